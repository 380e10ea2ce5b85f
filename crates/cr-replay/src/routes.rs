//! Per-person move lists.

use cr_core::{Direction, PersonId};

#[cfg(feature = "fx-hash")]
type RouteMap = rustc_hash::FxHashMap<PersonId, Vec<Direction>>;
#[cfg(not(feature = "fx-hash"))]
type RouteMap = std::collections::HashMap<PersonId, Vec<Direction>>;

/// Already-resolved routes, one ordered move list per person.
///
/// Looked up once per active person per tick.  Iteration order is
/// unspecified; the scheduler always walks persons in id order from the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutePlan {
    routes: RouteMap,
}

impl RoutePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the route of `person`, replacing any previous one.
    pub fn insert(&mut self, person: PersonId, route: Vec<Direction>) -> Option<Vec<Direction>> {
        self.routes.insert(person, route)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, person: PersonId, route: Vec<Direction>) -> Self {
        self.routes.insert(person, route);
        self
    }

    /// The route of `person`; empty when none was supplied.
    pub fn get(&self, person: PersonId) -> &[Direction] {
        self.routes.get(&person).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, person: PersonId) -> bool {
        self.routes.contains_key(&person)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Person ids in ascending order.
    pub fn person_ids(&self) -> Vec<PersonId> {
        let mut ids: Vec<PersonId> = self.routes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &[Direction])> + '_ {
        self.routes.iter().map(|(id, r)| (*id, r.as_slice()))
    }

    /// Ticks needed by the most expensive route under exact timing; an upper
    /// bound on the length of a replay.
    pub fn longest_cost(&self) -> u64 {
        self.routes
            .values()
            .map(|r| r.iter().map(|d| u64::from(d.tick_cost())).sum::<u64>())
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(PersonId, Vec<Direction>)> for RoutePlan {
    fn from_iter<I: IntoIterator<Item = (PersonId, Vec<Direction>)>>(iter: I) -> Self {
        Self { routes: iter.into_iter().collect() }
    }
}
