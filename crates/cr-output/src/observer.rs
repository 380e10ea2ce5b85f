//! `ReplayOutputObserver<W>` — bridges `ReplayObserver` to an `OutputWriter`.

use tracing::debug;

use cr_core::{ReplayConfig, Tick};
use cr_grid::Grid;
use cr_replay::{ReplayObserver, StepReport};

use crate::row::{HeatCellRow, PersonSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ReplayObserver`] that writes person snapshots, tick summaries and the
/// final heat map to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `ReplayObserver`
/// methods have no return value.  After `replay.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct ReplayOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_interval_ms: u64,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> ReplayOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// elapsed-time column.
    pub fn new(writer: W, config: &ReplayConfig) -> Self {
        Self {
            writer,
            tick_interval_ms: config.tick_interval_ms,
            last_error:       None,
        }
    }

    /// Record the initial snapshot as tick 0.  The replay itself only
    /// reports ticks it computes.
    pub fn record_initial(&mut self, grid: &Grid) {
        self.on_snapshot(Tick::ZERO, grid);
    }

    /// Take the stored write error (if any) after `replay.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the replay).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ReplayObserver for ReplayOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &StepReport) {
        let row = TickSummaryRow {
            tick:       tick.0,
            elapsed_ms: tick.0 * self.tick_interval_ms,
            active:     report.active as u64,
            moved:      report.moved.len() as u64,
            arrivals:   report.arrivals.len() as u64,
            blocked:    report.blocked.len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, grid: &Grid) {
        let rows: Vec<PersonSnapshotRow> = grid
            .persons()
            .map(|p| PersonSnapshotRow {
                person_id:    p.id.0,
                tick:         tick.0,
                x:            p.position.x,
                y:            p.position.y,
                reached_goal: p.reached_goal,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_replay_end(&mut self, final_tick: Tick, grid: &Grid) {
        let max = grid.max_ticks();
        let rows: Vec<HeatCellRow> = grid
            .cells()
            .filter(|(_, c)| c.visit_count > 0)
            .map(|(p, c)| HeatCellRow {
                x:           p.x,
                y:           p.y,
                visit_count: c.visit_count,
                shade:       c.heat_shade(max),
            })
            .collect();
        debug!(%final_tick, visited = rows.len(), max_visits = max, "writing heat map");

        let result = self.writer.write_heat_map(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
