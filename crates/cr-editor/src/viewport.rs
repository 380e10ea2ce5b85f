//! Pointer → cell / corner addressing over a grid drawn at a fixed cell size.
//!
//! Pointer coordinates are in grid space: origin at the bottom-left corner of
//! the drawing, `y` growing upwards, one cell = `cell_size` units.  Use
//! [`Viewport::flip_screen_y`] to convert from a top-down screen offset.

use cr_core::Point;
use cr_grid::Grid;

use crate::{EditError, EditResult};

// ── EditorConfig ──────────────────────────────────────────────────────────────

/// Hit-testing parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Drawn size of one cell.  Default: 30.
    pub cell_size: f64,

    /// Corner snapping tolerance as a fraction of `cell_size`.  Default: 0.5,
    /// which snaps to the nearest grid line.
    pub snap_ratio: f64,

    /// Width of the band along grid lines, as a fraction of `cell_size`,
    /// inside which a click counts as a corner click.  Default: 0.2.
    pub intersection_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size:          30.0,
            snap_ratio:         0.5,
            intersection_ratio: 0.2,
        }
    }
}

// ── PointerTarget ─────────────────────────────────────────────────────────────

/// What a pointer lands on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// The interior of a cell; used for person, goal and group edits.
    Cell(Point),
    /// Near a grid-line intersection; used for walls.
    Corner(Point),
}

/// `true` if `corner` may anchor a wall on a `width × height` grid.
///
/// Corners on the outer boundary are excluded.
#[inline]
pub fn corner_in_bounds(corner: Point, width: i32, height: i32) -> bool {
    corner.x > 0 && corner.x < width && corner.y > 0 && corner.y < height
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// A grid extent drawn with an [`EditorConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub config: EditorConfig,
    /// Extent in cells.
    pub width:  i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(config: EditorConfig, width: i32, height: i32) -> Self {
        Self { config, width, height }
    }

    pub fn for_grid(config: EditorConfig, grid: &Grid) -> Self {
        Self::new(config, grid.width(), grid.height())
    }

    /// Half-cell snapping tolerance, `floor(cell_size * snap_ratio)`.
    pub fn snap_tolerance(&self) -> f64 {
        (self.config.cell_size * self.config.snap_ratio).floor()
    }

    /// `floor(cell_size * intersection_ratio)`.
    pub fn intersection_band(&self) -> f64 {
        (self.config.cell_size * self.config.intersection_ratio).floor()
    }

    /// Convert a top-down screen offset into a grid-space `y`.
    pub fn flip_screen_y(&self, screen_y: f64) -> f64 {
        self.config.cell_size * f64::from(self.height) - screen_y
    }

    /// `floor(coordinate / cell_size)` on both axes.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] outside `[0, width) × [0, height)`.
    pub fn pointer_to_cell(&self, x: f64, y: f64) -> EditResult<Point> {
        let s = self.config.cell_size;
        let cell = Point::new((x / s).floor() as i32, (y / s).floor() as i32);
        if !cell.within(self.width, self.height) {
            return Err(EditError::OutOfBounds { point: cell });
        }
        Ok(cell)
    }

    /// Snap to a grid-line intersection: per axis, `floor(c / s)` when the
    /// in-cell remainder is below the snap tolerance, else `floor(c / s) + 1`.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if an index is `<= 0` or `>= extent`.
    pub fn pointer_to_corner(&self, x: f64, y: f64) -> EditResult<Point> {
        let tolerance = self.snap_tolerance();
        let corner = Point::new(self.snap(x, tolerance), self.snap(y, tolerance));
        if !corner_in_bounds(corner, self.width, self.height) {
            return Err(EditError::OutOfBounds { point: corner });
        }
        Ok(corner)
    }

    /// Decide between cell and corner addressing from the in-cell offsets:
    /// a pointer is inside a cell if either offset lies strictly within the
    /// band-trimmed interval `(band, cell_size - band)`.
    ///
    /// # Errors
    ///
    /// As [`pointer_to_cell`](Self::pointer_to_cell) or
    /// [`pointer_to_corner`](Self::pointer_to_corner).
    pub fn classify_pointer(&self, x: f64, y: f64) -> EditResult<PointerTarget> {
        let s = self.config.cell_size;
        let band = self.intersection_band();
        let interior = |c: f64| {
            let local = c.rem_euclid(s);
            local > band && local < s - band
        };
        if interior(x) || interior(y) {
            self.pointer_to_cell(x, y).map(PointerTarget::Cell)
        } else {
            self.pointer_to_corner(x, y).map(PointerTarget::Corner)
        }
    }

    fn snap(&self, coordinate: f64, tolerance: f64) -> i32 {
        let s = self.config.cell_size;
        let base = (coordinate / s).floor() as i32;
        if coordinate.rem_euclid(s) < tolerance { base } else { base + 1 }
    }
}
