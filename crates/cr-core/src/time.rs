//! Replay time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! discrete replay step; the mapping to wall-clock pacing lives in
//! `ReplayClock`:
//!
//!   elapsed_ms = tick * tick_interval_ms
//!
//! The engine never sleeps.  `tick_interval_ms` is a cadence hint for the
//! caller that drives `Replay::step` from a timer.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute replay tick counter.  `Tick(0)` is the initial snapshot.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── ReplayClock ───────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to elapsed pacing time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayClock {
    /// Milliseconds between two rendered snapshots.
    pub tick_interval_ms: u64,
    /// Advanced by `ReplayClock::advance()` once per step.
    pub current_tick: Tick,
}

impl ReplayClock {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            tick_interval_ms,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0.
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Playback time elapsed since tick 0 at the configured cadence.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_interval_ms
    }
}

impl fmt::Display for ReplayClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ms)", self.current_tick, self.elapsed_ms())
    }
}

// ── CursorTiming ──────────────────────────────────────────────────────────────

/// How a route cursor spends ticks on each move.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CursorTiming {
    /// Every move takes exactly `tick_cost` ticks; the displacement lands on
    /// the last of them.  A lone `RIGHT` arrives after 1 tick, a lone
    /// `RIGHT_UP` after 2.
    #[default]
    Exact,

    /// Animation protocol with a load delay: the displacement is applied
    /// at the start of the tick after the counter reached zero, and a freshly
    /// loaded move is charged `tick_cost + 1` before the tick's decrement.
    /// Every move therefore occupies `tick_cost + 1` ticks.
    FrontLoaded,
}

// ── ReplayConfig ──────────────────────────────────────────────────────────────

/// Replay configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the replay builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplayConfig {
    /// Pacing cadence for callers that animate the replay.  Default: 200 ms.
    pub tick_interval_ms: u64,

    /// Upper bound on ticks for `Replay::run`.  `None` runs until every
    /// route is completed.
    pub max_ticks: Option<u64>,

    /// Call `on_snapshot` every N ticks.  1 = every tick; 0 disables it.
    pub output_interval_ticks: u64,

    /// Per-move tick accounting.
    pub timing: CursorTiming,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:      200,
            max_ticks:             None,
            output_interval_ticks: 1,
            timing:                CursorTiming::Exact,
        }
    }
}

impl ReplayConfig {
    /// Construct a `ReplayClock` pre-configured for this run.
    pub fn make_clock(&self) -> ReplayClock {
        ReplayClock::new(self.tick_interval_ms)
    }
}
