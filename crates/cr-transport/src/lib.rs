//! `cr-transport` — JSON documents exchanged with the planning service.
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`document`]   | `MapDocument`, `StatisticsDocument` and their parts        |
//! | [`loader`]     | `load_grid`, `export_grid`, `load_routes`, reader/file I/O |
//! | [`error`]      | `TransportError`, `TransportResult<T>`                     |
//!
//! Route tokens are decoded into `Direction` here and nowhere else, so an
//! unknown token is a document error rather than a replay failure.

pub mod document;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use document::{
    BorderDoc, Estimate, GroupDoc, MapDocument, PersonDoc, RouteDoc, Statistics,
    StatisticsDocument,
};
pub use error::{TransportError, TransportResult};
pub use loader::{
    export_grid, load_grid, load_grid_reader, load_routes, load_routes_reader, read_map,
    read_map_path, read_statistics, read_statistics_path, write_map, write_map_path,
};
