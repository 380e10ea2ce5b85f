//! Two-click wall placement and deletion.

use tracing::{debug, warn};

use cr_core::{Point, WallSegment};
use cr_grid::Grid;

use crate::viewport::corner_in_bounds;
use crate::{EditError, EditResult, Viewport};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WallMode {
    #[default]
    Place,
    Delete,
}

/// Result of one accepted click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallClick {
    /// First corner recorded; waiting for the second.
    Anchored(Point),
    /// `added` is `false` if an identical wall already existed.
    Placed { segment: WallSegment, added: bool },
    /// `removed` is `false` if no wall joined these corners.
    Deleted { segment: WallSegment, removed: bool },
}

/// Two-click state machine over a grid's wall registry.
///
/// The first click anchors a corner, the second commits the segment.  Any
/// rejected click returns the tool to idle, so the next click starts a new
/// wall.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallTool {
    mode:   WallMode,
    anchor: Option<Point>,
}

impl WallTool {
    pub fn new(mode: WallMode) -> Self {
        Self { mode, anchor: None }
    }

    #[inline]
    pub fn mode(&self) -> WallMode {
        self.mode
    }

    /// Switch modes; drops any pending anchor.
    pub fn set_mode(&mut self, mode: WallMode) {
        self.mode = mode;
        self.anchor = None;
    }

    /// The corner saved by the first click, if any.
    #[inline]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    /// Handle a click on `corner`.
    ///
    /// # Errors
    ///
    /// - [`EditError::OutOfBounds`] if `corner` is on or past the grid
    ///   boundary.
    /// - [`EditError::InvalidGeometry`] if the second corner shares no axis
    ///   (or both axes) with the first.
    ///
    /// Either error resets the tool to idle.
    pub fn click(&mut self, grid: &mut Grid, corner: Point) -> EditResult<WallClick> {
        if !corner_in_bounds(corner, grid.width(), grid.height()) {
            self.anchor = None;
            warn!(%corner, "wall corner out of bounds");
            return Err(EditError::OutOfBounds { point: corner });
        }
        let Some(first) = self.anchor.take() else {
            self.anchor = Some(corner);
            return Ok(WallClick::Anchored(corner));
        };
        let segment = WallSegment::new(first, corner).inspect_err(|_| {
            warn!(%first, second = %corner, "diagonal wall rejected");
        })?;

        let click = match self.mode {
            WallMode::Place => WallClick::Placed {
                segment,
                added: grid.add_wall(segment)?,
            },
            WallMode::Delete => WallClick::Deleted {
                segment,
                removed: grid.remove_wall(&segment),
            },
        };
        debug!(?click, "wall edit");
        Ok(click)
    }

    /// [`Viewport::pointer_to_corner`] then [`click`](Self::click).
    pub fn click_pointer(
        &mut self,
        grid:     &mut Grid,
        viewport: &Viewport,
        x:        f64,
        y:        f64,
    ) -> EditResult<WallClick> {
        match viewport.pointer_to_corner(x, y) {
            Ok(corner) => self.click(grid, corner),
            Err(e) => {
                self.anchor = None;
                Err(e)
            }
        }
    }
}
