//! Plain data row types written by output backends.

/// One person's state in one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonSnapshotRow {
    pub person_id:    u32,
    pub tick:         u64,
    pub x:            i32,
    pub y:            i32,
    pub reached_goal: bool,
}

/// Summary of one replay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    /// `tick × tick_interval_ms`: when the tick is shown in a paced replay.
    pub elapsed_ms: u64,
    pub active:     u64,
    pub moved:      u64,
    pub arrivals:   u64,
    pub blocked:    u64,
}

/// Heat of one visited cell at the end of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatCellRow {
    pub x:           i32,
    pub y:           i32,
    pub visit_count: u32,
    /// Red/green colour component, see `Cell::heat_shade`.
    pub shade:       u8,
}
