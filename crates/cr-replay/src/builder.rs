//! Fluent builder for constructing a [`Replay`].

use tracing::debug;

use cr_core::ReplayConfig;
use cr_grid::Grid;

use crate::{Replay, ReplayError, ReplayResult, RoutePlan};

/// Fluent builder for [`Replay`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                 |
/// |-----------------|-------------------------|
/// | `.config(c)`    | `ReplayConfig::default()` |
/// | `.routes(r)`    | Empty `RoutePlan`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut replay = ReplayBuilder::new(grid)
///     .routes(plan)
///     .build()?;
/// replay.run(&mut NoopObserver)?;
/// ```
pub struct ReplayBuilder {
    grid:   Grid,
    config: Option<ReplayConfig>,
    routes: Option<RoutePlan>,
}

impl ReplayBuilder {
    /// Start from the initial snapshot.
    pub fn new(grid: Grid) -> Self {
        Self { grid, config: None, routes: None }
    }

    pub fn config(mut self, config: ReplayConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Supply the routes.  Every route must belong to a person on the grid.
    pub fn routes(mut self, routes: RoutePlan) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Validate inputs and return a replay positioned at tick 0.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::Config`] for `max_ticks = Some(0)`.
    /// - [`ReplayError::UnknownPerson`] for a route whose person is not on
    ///   the grid.
    pub fn build(self) -> ReplayResult<Replay> {
        let config = self.config.unwrap_or_default();
        if config.max_ticks == Some(0) {
            return Err(ReplayError::Config("max_ticks must be at least 1".into()));
        }

        let routes = self.routes.unwrap_or_default();
        if let Some(unknown) = routes
            .person_ids()
            .into_iter()
            .find(|id| self.grid.person(*id).is_none())
        {
            return Err(ReplayError::UnknownPerson(unknown));
        }

        debug!(
            persons = self.grid.person_count(),
            routes  = routes.len(),
            timing  = ?config.timing,
            "replay built"
        );
        Ok(Replay::new(config, self.grid, routes))
    }
}
