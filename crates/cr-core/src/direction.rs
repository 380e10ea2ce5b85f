//! The closed movement-token vocabulary consumed by the replay scheduler.
//!
//! Tokens arrive as strings in the routes document and are parsed exactly
//! once, at the decoding boundary.  After that every token is a `Direction`
//! and the displacement and tick-cost tables below are exhaustive.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// One move of a person's route.
///
/// `Up` increases `y`.  Orthogonal moves and `Wait` cost one tick; diagonal
/// moves cost two.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Direction {
    Wait,
    Up,
    Down,
    Left,
    Right,
    LeftUp,
    RightUp,
    LeftDown,
    RightDown,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::Wait,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::LeftUp,
        Direction::RightUp,
        Direction::LeftDown,
        Direction::RightDown,
    ];

    /// Displacement `(dx, dy)` applied when the move completes.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Wait      => (0, 0),
            Direction::Up        => (0, 1),
            Direction::Down      => (0, -1),
            Direction::Left      => (-1, 0),
            Direction::Right     => (1, 0),
            Direction::LeftUp    => (-1, 1),
            Direction::RightUp   => (1, 1),
            Direction::LeftDown  => (-1, -1),
            Direction::RightDown => (1, -1),
        }
    }

    /// Ticks the move occupies.
    #[inline]
    pub fn tick_cost(self) -> u32 {
        if self.is_diagonal() { 2 } else { 1 }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::LeftUp | Direction::RightUp | Direction::LeftDown | Direction::RightDown
        )
    }

    /// Wire token, e.g. `"RIGHT_UP"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Wait      => "WAIT",
            Direction::Up        => "UP",
            Direction::Down      => "DOWN",
            Direction::Left      => "LEFT",
            Direction::Right     => "RIGHT",
            Direction::LeftUp    => "LEFT_UP",
            Direction::RightUp   => "RIGHT_UP",
            Direction::LeftDown  => "LEFT_DOWN",
            Direction::RightDown => "RIGHT_DOWN",
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::UnsupportedDirection(s.to_owned()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
