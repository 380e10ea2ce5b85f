//! Seeded random scenarios.
//!
//! Places persons on random free cells with random goals, for demos and
//! determinism tests.  The same grid and seed always produce the same
//! placement.

use tracing::debug;

use cr_core::{PersonId, Point, ScenarioRng};

use crate::{Grid, Person};

/// Child-stream offsets so positions and goals draw independent sequences.
const POSITION_STREAM: u64 = 1;
const GOAL_STREAM: u64 = 2;

/// Place up to `count` persons on distinct free cells (no wall, no goal,
/// unoccupied), each with a goal on another free cell.
///
/// Returns the ids placed, which may be fewer than `count` on a crowded
/// grid.  Goal cells are marked.
pub fn scatter_persons(grid: &mut Grid, count: usize, seed: u64) -> Vec<PersonId> {
    let mut root = ScenarioRng::new(seed);
    let mut position_rng = root.child(POSITION_STREAM);
    let mut goal_rng = root.child(GOAL_STREAM);

    let mut free: Vec<Point> = grid
        .cells()
        .filter(|(p, c)| !c.is_wall && !c.goal && !grid.is_occupied(*p))
        .map(|(p, _)| p)
        .collect();
    position_rng.shuffle(&mut free);

    let starts: Vec<Point> = free.iter().copied().take(count).collect();
    let goal_pool: Vec<Point> = free.iter().copied().skip(starts.len()).collect();
    if goal_pool.is_empty() {
        debug!(requested = count, "no free cells left for goals");
        return Vec::new();
    }

    let mut next = grid.next_person_id();
    let mut placed = Vec::with_capacity(starts.len());
    for start in starts {
        let Some(&goal) = goal_rng.choose(&goal_pool) else {
            break;
        };
        if grid.add_person(Person::new(next, start, goal)) {
            grid.set_goal(goal);
            placed.push(next);
        }
        next = next.next();
    }

    debug!(requested = count, placed = placed.len(), seed, "scattered persons");
    placed
}
