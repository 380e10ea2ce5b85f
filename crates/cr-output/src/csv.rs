//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `person_snapshots.csv`
//! - `tick_summaries.csv`
//! - `heat_map.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{HeatCellRow, OutputResult, PersonSnapshotRow, TickSummaryRow};

/// Writes replay output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    heat:      Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("person_snapshots.csv"))?;
        snapshots.write_record(["person_id", "tick", "x", "y", "reached_goal"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "elapsed_ms", "active", "moved", "arrivals", "blocked"])?;

        let mut heat = Writer::from_path(dir.join("heat_map.csv"))?;
        heat.write_record(["x", "y", "visit_count", "shade"])?;

        Ok(Self {
            snapshots,
            summaries,
            heat,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[PersonSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.person_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                (row.reached_goal as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.active.to_string(),
            row.moved.to_string(),
            row.arrivals.to_string(),
            row.blocked.to_string(),
        ])?;
        Ok(())
    }

    fn write_heat_map(&mut self, rows: &[HeatCellRow]) -> OutputResult<()> {
        for row in rows {
            self.heat.write_record(&[
                row.x.to_string(),
                row.y.to_string(),
                row.visit_count.to_string(),
                row.shade.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.heat.flush()?;
        Ok(())
    }
}
