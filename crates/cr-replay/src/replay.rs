//! The `Replay` runner and its snapshot history.

use tracing::info;

use cr_core::{ReplayClock, ReplayConfig, Tick};
use cr_grid::Grid;

use crate::{
    step_replay, ReplayError, ReplayObserver, ReplayResult, RouteCursors, RoutePlan, StepReport,
};

/// Drives [`step_replay`] tick by tick and keeps every snapshot.
///
/// `history()[n]` is the grid after tick `n`; `history()[0]` is the initial
/// state.  Snapshots are never mutated once appended.  The runner does not
/// sleep: callers that animate pace themselves with
/// `config.tick_interval_ms` between calls to [`step`](Self::step).
///
/// Create via [`ReplayBuilder`][crate::ReplayBuilder].
pub struct Replay {
    pub config: ReplayConfig,

    /// Tick of the latest snapshot.
    pub clock: ReplayClock,

    routes:  RoutePlan,
    cursors: RouteCursors,
    history: Vec<Grid>,
    done:    bool,
}

impl Replay {
    pub(crate) fn new(config: ReplayConfig, initial: Grid, routes: RoutePlan) -> Self {
        let cursors = RouteCursors::new(config.timing);
        let done = crate::replay_finished(&initial, &cursors, &routes);
        Self {
            clock: config.make_clock(),
            config,
            routes,
            cursors,
            history: vec![initial],
            done,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The latest snapshot.
    pub fn current(&self) -> &Grid {
        // history is never empty: it starts with the initial grid.
        &self.history[self.history.len() - 1]
    }

    pub fn initial(&self) -> &Grid {
        &self.history[0]
    }

    pub fn history(&self) -> &[Grid] {
        &self.history
    }

    /// Snapshot after `tick`, if it has been computed.
    pub fn snapshot(&self, tick: Tick) -> Option<&Grid> {
        usize::try_from(tick.0).ok().and_then(|i| self.history.get(i))
    }

    pub fn cursors(&self) -> &RouteCursors {
        &self.cursors
    }

    pub fn routes(&self) -> &RoutePlan {
        &self.routes
    }

    /// `true` once every route is completed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Compute one tick.  Returns `false` without producing a snapshot if
    /// the replay is already done.
    pub fn step<O: ReplayObserver>(&mut self, observer: &mut O) -> bool {
        if self.done {
            return false;
        }
        let now = self.clock.current_tick + 1;
        observer.on_tick_start(now);

        let step = step_replay(self.current(), &self.cursors, &self.routes);
        if !step.report.advanced {
            self.done = true;
            return false;
        }
        self.cursors = step.cursors;
        self.done = step.done;
        self.history.push(step.grid);
        self.clock.advance();

        self.notify(now, &step.report, observer);
        true
    }

    /// Step until every route is completed.  Returns the final tick.
    ///
    /// # Errors
    ///
    /// [`ReplayError::TickLimit`] if `config.max_ticks` is reached first.
    /// Snapshots computed so far are kept.
    pub fn run<O: ReplayObserver>(&mut self, observer: &mut O) -> ReplayResult<Tick> {
        while !self.done {
            if let Some(limit) = self.config.max_ticks {
                if self.clock.current_tick.0 >= limit {
                    return Err(ReplayError::TickLimit { limit });
                }
            }
            self.step(observer);
        }
        Ok(self.clock.current_tick)
    }

    /// Step at most `n` ticks, stopping early when the replay completes.
    /// Returns the number of ticks produced.
    pub fn run_ticks<O: ReplayObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        let mut produced = 0;
        while produced < n && self.step(observer) {
            produced += 1;
        }
        produced
    }

    /// Discard all snapshots and cursors and start over from the initial
    /// grid with heat zeroed.
    pub fn reset(&mut self) {
        let mut initial = self.history.swap_remove(0);
        initial.reset_heat();
        self.history = vec![initial];
        self.cursors = RouteCursors::new(self.config.timing);
        self.clock.reset();
        self.done = crate::replay_finished(self.initial(), &self.cursors, &self.routes);
    }

    fn notify<O: ReplayObserver>(&self, now: Tick, report: &StepReport, observer: &mut O) {
        let grid = self.current();
        for id in &report.arrivals {
            if let Some(person) = grid.person(*id) {
                observer.on_goal_reached(now, person);
            }
        }
        observer.on_tick_end(now, report);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, grid);
        }
        if self.done {
            info!(
                ticks    = now.0,
                persons  = grid.person_count(),
                reached  = grid.persons().filter(|p| p.reached_goal).count(),
                "replay complete"
            );
            observer.on_replay_end(now, grid);
        }
    }
}
