//! A single grid location.

use std::collections::BTreeSet;

use cr_core::Orientation;

/// Non-blue colour component at maximum heat.
const MAX_HEAT_EFFECT: u32 = 128;

/// One grid location: wall flag and orientation tags, goal flag, and the
/// visit counter behind the heat map.
///
/// Occupants are not stored here; see [`Grid::occupants`][crate::Grid::occupants].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// `true` iff some wall segment rasterizes over this cell.
    pub is_wall: bool,

    /// Orientations of the walls covering this cell (tag set, not a counter).
    pub wall_orientations: BTreeSet<Orientation>,

    /// A goal is marked here.  Cleared once, when a person reaches it.
    pub goal: bool,

    /// Ticks during which some active person was scheduled in this cell.
    pub visit_count: u32,

    /// Heat tick of the last increment; guards double counting.
    last_marked: Option<u64>,
}

impl Cell {
    pub fn has_wall(&self, orientation: Orientation) -> bool {
        self.wall_orientations.contains(&orientation)
    }

    pub(crate) fn tag_wall(&mut self, orientation: Orientation) {
        self.is_wall = true;
        self.wall_orientations.insert(orientation);
    }

    pub(crate) fn clear_walls(&mut self) {
        self.is_wall = false;
        self.wall_orientations.clear();
    }

    /// Count one visit for `heat_tick`.  Returns `false` if the cell was
    /// already counted during that tick.
    pub(crate) fn mark(&mut self, heat_tick: u64) -> bool {
        if self.last_marked == Some(heat_tick) {
            return false;
        }
        self.visit_count += 1;
        self.last_marked = Some(heat_tick);
        true
    }

    pub(crate) fn reset_heat(&mut self) {
        self.visit_count = 0;
        self.last_marked = None;
    }

    /// Red/green component of the heat-map colour for this cell.
    ///
    /// The colour is `(shade, shade, 255)`: white for unvisited cells,
    /// darkening towards `(127, 127, 255)` at `max_ticks`.
    pub fn heat_shade(&self, max_ticks: u32) -> u8 {
        if max_ticks == 0 {
            return u8::MAX;
        }
        let effect = (self.visit_count.min(max_ticks) as u64 * MAX_HEAT_EFFECT as u64
            / max_ticks as u64) as u32;
        (255 - effect) as u8
    }
}
