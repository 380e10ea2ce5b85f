//! One atomic replay step.

use tracing::{debug, warn};

use cr_core::PersonId;
use cr_grid::Grid;

use crate::{Advance, RouteCursors, RoutePlan};

/// What happened during one step, for observers and output writers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// `false` when nothing was left to do and no tick was produced.
    pub advanced: bool,
    /// Persons processed this tick.
    pub active: usize,
    /// Persons whose position changed.
    pub moved: Vec<PersonId>,
    /// Persons that reached their goal this tick.
    pub arrivals: Vec<PersonId>,
    /// Persons whose move would have left the grid.
    pub blocked: Vec<PersonId>,
}

/// Output of [`step_replay`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayStep {
    /// The next snapshot.  Shares no state with the input grid.
    pub grid: Grid,
    pub cursors: RouteCursors,
    /// `true` once no person has anything left to do.
    pub done: bool,
    pub report: StepReport,
}

/// `true` if `person` still moves: not at its goal and route not completed.
fn is_active(grid: &Grid, cursors: &RouteCursors, routes: &RoutePlan, person: PersonId) -> bool {
    grid.person(person)
        .is_some_and(|p| !p.reached_goal && !cursors.is_complete(person, routes.get(person)))
}

/// `true` if no person of `grid` has anything left to do.
pub fn replay_finished(grid: &Grid, cursors: &RouteCursors, routes: &RoutePlan) -> bool {
    !grid.persons().any(|p| is_active(grid, cursors, routes, p.id))
}

/// Advance every active person of `grid` by one tick.
///
/// Reads come only from `grid`; writes go to a fresh clone, so no person
/// sees another's move of the same tick.  Persons are processed in id order.
///
/// Per person:
/// - the cursor spends one tick of the current move;
/// - a completed move displaces the person, unless the target lies outside
///   the grid, in which case the person stays and the move is consumed;
/// - standing on the goal afterwards marks the goal reached and clears the
///   goal flag; otherwise the occupied cell accrues one visit.
///
/// If nobody is active the input is returned unchanged with `done = true`
/// and `report.advanced = false`.
pub fn step_replay(grid: &Grid, cursors: &RouteCursors, routes: &RoutePlan) -> ReplayStep {
    let mut next = grid.clone();
    let mut next_cursors = cursors.clone();
    let mut report = StepReport::default();

    if replay_finished(grid, cursors, routes) {
        return ReplayStep { grid: next, cursors: next_cursors, done: true, report };
    }

    next.add_tick();
    report.advanced = true;

    for person in grid.persons() {
        if person.reached_goal {
            continue;
        }
        let route = routes.get(person.id);
        let cursor = cursors.get_or_start(person.id, route);
        let (cursor, advance) = cursor.advance(route, cursors.timing());
        next_cursors.set(person.id, cursor);

        let position = match advance {
            Advance::Finished => continue,
            Advance::Hold => person.position,
            Advance::Move(direction) => {
                let target = person.position.offset(direction.delta());
                if !grid.contains(target) {
                    warn!(id = %person.id, from = %person.position, %direction, "move leaves the grid; holding position");
                    report.blocked.push(person.id);
                    report.active += 1;
                    continue;
                }
                if target != person.position {
                    next.relocate_person(person.id, target);
                    report.moved.push(person.id);
                }
                target
            }
        };
        report.active += 1;

        if position == person.goal {
            next.mark_goal_reached(person.id);
            report.arrivals.push(person.id);
        } else {
            next.mark_cell(position);
        }
    }

    let done = replay_finished(&next, &next_cursors, routes);
    debug!(
        active   = report.active,
        moved    = report.moved.len(),
        arrivals = report.arrivals.len(),
        done,
        "replay step"
    );
    ReplayStep { grid: next, cursors: next_cursors, done, report }
}
