//! Replay observer trait for progress reporting and data collection.

use cr_core::Tick;
use cr_grid::{Grid, Person};

use crate::StepReport;

/// Callbacks invoked by [`Replay`][crate::Replay] around every tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl ReplayObserver for Arrivals {
///     fn on_goal_reached(&mut self, tick: Tick, person: &Person) {
///         println!("{tick}: {} reached {}", person.id, person.goal);
///     }
/// }
/// ```
pub trait ReplayObserver {
    /// Called before the tick is computed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's snapshot has been appended to the history.
    fn on_tick_end(&mut self, _tick: Tick, _report: &StepReport) {}

    /// Called every `config.output_interval_ticks` ticks with the new
    /// snapshot.
    fn on_snapshot(&mut self, _tick: Tick, _grid: &Grid) {}

    /// Called once per person, on the tick it reaches its goal.
    fn on_goal_reached(&mut self, _tick: Tick, _person: &Person) {}

    /// Called once when the last route completes, with the terminal snapshot.
    fn on_replay_end(&mut self, _final_tick: Tick, _grid: &Grid) {}
}

/// A [`ReplayObserver`] that does nothing.
pub struct NoopObserver;

impl ReplayObserver for NoopObserver {}
