//! Derived cell → occupants index.
//!
//! Persons are stored once, in the grid's arena.  Renderers that need "who
//! stands where" for every cell build this index once per snapshot instead
//! of scanning the arena per cell.

use std::collections::BTreeMap;

use cr_core::{PersonId, Point};

use crate::Grid;

/// Occupants per point, each list in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    by_point: BTreeMap<Point, Vec<PersonId>>,
}

impl OccupancyIndex {
    /// O(persons · log persons) scan of the arena.
    pub fn build(grid: &Grid) -> Self {
        let mut staged: BTreeMap<Point, Vec<(u64, PersonId)>> = BTreeMap::new();
        for person in grid.persons() {
            staged
                .entry(person.position)
                .or_default()
                .push((person.arrival, person.id));
        }
        let by_point = staged
            .into_iter()
            .map(|(point, mut entries)| {
                entries.sort_unstable();
                (point, entries.into_iter().map(|(_, id)| id).collect())
            })
            .collect();
        Self { by_point }
    }

    /// Occupants of `point`; empty if none.
    pub fn get(&self, point: Point) -> &[PersonId] {
        self.by_point.get(&point).map_or(&[], Vec::as_slice)
    }

    /// The occupant a renderer draws for `point`.
    pub fn primary(&self, point: Point) -> Option<PersonId> {
        self.get(point).first().copied()
    }

    /// Number of occupied points.
    pub fn len(&self) -> usize {
        self.by_point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_point.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &[PersonId])> + '_ {
        self.by_point.iter().map(|(p, ids)| (*p, ids.as_slice()))
    }
}
