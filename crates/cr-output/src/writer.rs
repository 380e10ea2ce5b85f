//! The `OutputWriter` trait implemented by backend writers.

use crate::{HeatCellRow, OutputResult, PersonSnapshotRow, TickSummaryRow};

/// Sink for replay output rows.
///
/// The observer never propagates these errors; it keeps the first one for
/// [`ReplayOutputObserver::take_error`][crate::ReplayOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of person snapshots.
    fn write_snapshots(&mut self, rows: &[PersonSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the final heat map.
    fn write_heat_map(&mut self, rows: &[HeatCellRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
