//! Integer grid geometry: points, wall segments and their orientation.
//!
//! Two coordinate spaces share the `Point` type:
//!
//! - **cell** coordinates address a grid cell, `x ∈ [0, width)`,
//!   `y ∈ [0, height)`;
//! - **corner** coordinates address a grid-line intersection,
//!   `x ∈ [0, width]`, `y ∈ [0, height]`.  Walls run between corners.
//!
//! A wall from corner `a` to corner `b` covers the `|Δ|` cells whose
//! lower-left corner lies on `[min, max)` along the wall's axis.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Point ─────────────────────────────────────────────────────────────────────

/// An integer grid coordinate (cell or corner, depending on context).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point displaced by `(dx, dy)`.
    #[inline]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// `true` if `self` lies in `[0, width) × [0, height)`.
    #[inline]
    pub fn within(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Orientation ───────────────────────────────────────────────────────────────

/// Axis a wall runs along.  A cell may carry both tags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical   => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── WallSegment ───────────────────────────────────────────────────────────────

/// An axis-aligned wall between two corner coordinates.
///
/// Invariant: `first.x == second.x` XOR `first.y == second.y`.  The fields
/// are private so the invariant can only be established through
/// [`WallSegment::new`]; orientation is always derived from the endpoints.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSegment"))]
pub struct WallSegment {
    first:  Point,
    second: Point,
}

/// Unvalidated wire shape of a segment.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSegment {
    first:  Point,
    second: Point,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSegment> for WallSegment {
    type Error = CoreError;

    fn try_from(raw: RawSegment) -> CoreResult<Self> {
        WallSegment::new(raw.first, raw.second)
    }
}

impl WallSegment {
    /// Validate and build a segment.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidGeometry`] when the endpoints share neither axis
    /// (a diagonal) or both (a zero-length segment).
    pub fn new(first: Point, second: Point) -> CoreResult<Self> {
        let vertical   = first.x == second.x;
        let horizontal = first.y == second.y;
        if vertical == horizontal {
            return Err(CoreError::InvalidGeometry { first, second });
        }
        Ok(Self { first, second })
    }

    #[inline]
    pub fn first(&self) -> Point {
        self.first
    }

    #[inline]
    pub fn second(&self) -> Point {
        self.second
    }

    pub fn orientation(&self) -> Orientation {
        if self.first.x == self.second.x {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Number of grid lines the segment spans.
    pub fn len(&self) -> u32 {
        (self.second.x - self.first.x).unsigned_abs() + (self.second.y - self.first.y).unsigned_abs()
    }

    /// Always `false`; zero-length segments are rejected by [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `true` when both segments join the same pair of corners, in either
    /// endpoint order.
    pub fn same_endpoints(&self, other: &WallSegment) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }

    /// Cells covered by this wall, in ascending order along its axis.
    ///
    /// The far endpoint is exclusive.  Cells may fall outside a particular
    /// grid; callers bounds-check against their own extent.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let (lo, hi) = match self.orientation() {
            Orientation::Vertical   => (self.first.y.min(self.second.y), self.first.y.max(self.second.y)),
            Orientation::Horizontal => (self.first.x.min(self.second.x), self.first.x.max(self.second.x)),
        };
        let orientation = self.orientation();
        let fixed = match orientation {
            Orientation::Vertical   => self.first.x,
            Orientation::Horizontal => self.first.y,
        };
        (lo..hi).map(move |v| match orientation {
            Orientation::Vertical   => Point::new(fixed, v),
            Orientation::Horizontal => Point::new(v, fixed),
        })
    }
}

impl fmt::Display for WallSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.first, self.second, self.orientation())
    }
}
