//! Movable entities: persons and placement groups.

use cr_core::{GroupId, PersonId, Point};

/// A person on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub id:           PersonId,
    pub position:     Point,
    pub goal:         Point,
    pub reached_goal: bool,
    /// Arrival stamp in the current cell; orders co-located occupants.
    pub(crate) arrival: u64,
}

impl Person {
    pub fn new(id: PersonId, position: Point, goal: Point) -> Self {
        Self {
            id,
            position,
            goal,
            reached_goal: false,
            arrival: 0,
        }
    }

    /// `true` while the person stands on its goal point.
    #[inline]
    pub fn at_goal(&self) -> bool {
        self.position == self.goal
    }
}

/// A placement convenience: `member_count` persons created together at
/// `anchor`.  After creation members move independently; the group is only
/// kept so the editor can remove or export it as a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id:           GroupId,
    pub anchor:       Point,
    pub member_count: u32,
    pub member_ids:   Vec<PersonId>,
}
