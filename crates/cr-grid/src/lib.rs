//! `cr-grid` — the grid data model.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`cell`]        | `Cell` — wall flag + tags, goal flag, heat counter        |
//! | [`entity`]      | `Person`, `Group`                                         |
//! | [`grid`]        | `Grid` — cells, wall registry, person arena, groups       |
//! | [`occupancy`]   | `OccupancyIndex` — derived cell → occupants lookup        |
//! | [`scatter`]     | `scatter_persons` — seeded random scenarios               |
//! | [`error`]       | `GridError`, `GridResult<T>`                              |
//!
//! # Single source of truth
//!
//! Persons live in one arena keyed by `PersonId`.  Cells never own or list
//! persons; "who is in this cell" is answered from the arena on demand, so
//! there is no duplicate index to keep in sync.  Cloning a `Grid` is a deep
//! copy with no shared state, which makes every clone a valid snapshot.

pub mod cell;
pub mod entity;
pub mod error;
pub mod grid;
pub mod occupancy;
pub mod scatter;


pub use cell::Cell;
pub use entity::{Group, Person};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use occupancy::OccupancyIndex;
pub use scatter::scatter_persons;
