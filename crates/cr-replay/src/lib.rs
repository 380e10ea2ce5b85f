//! `cr-replay` — tick-based route replay scheduler for the crowd replay engine.
//!
//! # One step
//!
//! ```text
//! step_replay(grid, cursors, routes):
//!   next = grid.clone(); next.add_tick()
//!   for person in grid (ascending PersonId), not yet at goal:
//!     ① Cursor  — spend one tick of the current move (lazily started).
//!     ② Move    — a landed move displaces the person in `next`;
//!                 off-grid targets are consumed without moving.
//!     ③ Goal    — standing on the goal marks it reached and clears the
//!                 goal flag; otherwise the cell accrues one visit.
//!   done = nobody is left with an uncompleted route
//! ```
//!
//! Reads come only from `grid` and writes only go to `next`, so a tick is an
//! atomic batch.  Cursors are threaded through by value.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the per-tick route lookup |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cr_replay::{NoopObserver, ReplayBuilder, RoutePlan};
//!
//! let mut replay = ReplayBuilder::new(grid).routes(plan).build()?;
//! let final_tick = replay.run(&mut NoopObserver)?;
//! let terminal = replay.current();
//! ```

pub mod builder;
pub mod cursor;
pub mod error;
pub mod observer;
pub mod replay;
pub mod routes;
pub mod step;


pub use builder::ReplayBuilder;
pub use cr_core::CursorTiming;
pub use cursor::{Advance, RouteCursor, RouteCursors};
pub use error::{ReplayError, ReplayResult};
pub use observer::{NoopObserver, ReplayObserver};
pub use replay::Replay;
pub use routes::RoutePlan;
pub use step::{replay_finished, step_replay, ReplayStep, StepReport};
