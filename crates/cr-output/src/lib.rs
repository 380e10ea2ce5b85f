//! `cr-output` — replay output writers for the crowd replay engine.
//!
//! | Backend | Files created                                                   |
//! |---------|-----------------------------------------------------------------|
//! | CSV     | `person_snapshots.csv`, `tick_summaries.csv`, `heat_map.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`ReplayOutputObserver`], which implements `cr_replay::ReplayObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cr_output::{CsvWriter, ReplayOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = ReplayOutputObserver::new(writer, &replay.config);
//! obs.record_initial(replay.initial());
//! replay.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReplayOutputObserver;
pub use row::{HeatCellRow, PersonSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
