//! `cr-core` — foundational types for the crowd replay engine.
//!
//! This crate is a dependency of every other `cr-*` crate.  It has no `cr-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PersonId`, `GroupId`                                 |
//! | [`geometry`]    | `Point`, `WallSegment`, `Orientation`                 |
//! | [`direction`]   | `Direction` move tokens, displacement and tick cost   |
//! | [`time`]        | `Tick`, `ReplayClock`, `ReplayConfig`, `CursorTiming` |
//! | [`rng`]         | `ScenarioRng` (seeded scenario generation)            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on public types (cr-transport)   |

pub mod direction;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geometry::{Orientation, Point, WallSegment};
pub use ids::{GroupId, PersonId};
pub use rng::ScenarioRng;
pub use time::{CursorTiming, ReplayClock, ReplayConfig, Tick};
