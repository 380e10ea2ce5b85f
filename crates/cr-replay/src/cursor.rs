//! Route cursors: per-person replay progress as plain values.
//!
//! A cursor is never mutated in place.  [`RouteCursor::advance`] consumes the
//! cursor of the previous tick and returns the cursor of the next one along
//! with what the person does this tick, so the "current" and "next" states of
//! a replay never alias.

use std::collections::BTreeMap;

use cr_core::{CursorTiming, Direction, PersonId};

/// What a person does during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The current move is still in flight.
    Hold,
    /// The move completes this tick; apply its displacement.
    Move(Direction),
    /// The route was already completed before this tick.
    Finished,
}

/// Progress through one person's route.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RouteCursor {
    /// Index of the move in flight.  `>= route.len()` once completed.
    pub move_index: usize,
    /// Ticks left before the move in flight lands.
    pub ticks_remaining: u32,
}

impl RouteCursor {
    /// A fresh cursor on the first move of `route`.
    pub fn start(route: &[Direction]) -> Self {
        Self {
            move_index:      0,
            ticks_remaining: route.first().map_or(0, |d| d.tick_cost()),
        }
    }

    /// `true` once every move of `route` has been applied.  Vacuously true
    /// for an empty route.
    #[inline]
    pub fn is_complete(&self, route: &[Direction]) -> bool {
        self.move_index >= route.len()
    }

    /// Spend one tick on `route`.
    pub fn advance(self, route: &[Direction], timing: CursorTiming) -> (RouteCursor, Advance) {
        if self.is_complete(route) {
            return (self, Advance::Finished);
        }
        match timing {
            CursorTiming::Exact       => self.advance_exact(route),
            CursorTiming::FrontLoaded => self.advance_front_loaded(route),
        }
    }

    /// Decrement first; the move lands on the tick its counter reaches zero.
    fn advance_exact(self, route: &[Direction]) -> (RouteCursor, Advance) {
        let remaining = self.ticks_remaining.saturating_sub(1);
        if remaining > 0 {
            return (Self { ticks_remaining: remaining, ..self }, Advance::Hold);
        }
        let direction = route[self.move_index];
        let move_index = self.move_index + 1;
        let next = Self {
            move_index,
            ticks_remaining: route.get(move_index).map_or(0, |d| d.tick_cost()),
        };
        (next, Advance::Move(direction))
    }

    /// Check for zero first, reload with `cost + 1`, then decrement.
    fn advance_front_loaded(self, route: &[Direction]) -> (RouteCursor, Advance) {
        let mut next = self;
        let mut advance = Advance::Hold;
        if self.ticks_remaining == 0 {
            advance = Advance::Move(route[self.move_index]);
            next.move_index += 1;
            if let Some(d) = route.get(next.move_index) {
                next.ticks_remaining = d.tick_cost() + 1;
            }
        }
        next.ticks_remaining = next.ticks_remaining.saturating_sub(1);
        (next, advance)
    }
}

/// The cursors of every person touched so far in a replay.
///
/// Cursors are created lazily, the first time the scheduler processes a
/// person, and discarded with the replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteCursors {
    timing:  CursorTiming,
    cursors: BTreeMap<PersonId, RouteCursor>,
}

impl RouteCursors {
    pub fn new(timing: CursorTiming) -> Self {
        Self { timing, cursors: BTreeMap::new() }
    }

    #[inline]
    pub fn timing(&self) -> CursorTiming {
        self.timing
    }

    pub fn get(&self, person: PersonId) -> Option<RouteCursor> {
        self.cursors.get(&person).copied()
    }

    /// The cursor of `person`, or a fresh one on `route`.
    pub fn get_or_start(&self, person: PersonId, route: &[Direction]) -> RouteCursor {
        self.get(person).unwrap_or_else(|| RouteCursor::start(route))
    }

    /// Record the cursor of `person` for the next tick.
    pub fn set(&mut self, person: PersonId, cursor: RouteCursor) {
        self.cursors.insert(person, cursor);
    }

    /// `true` if `person` has nothing left to do on `route`.
    pub fn is_complete(&self, person: PersonId, route: &[Direction]) -> bool {
        match self.cursors.get(&person) {
            Some(c) => c.is_complete(route),
            None    => route.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonId, RouteCursor)> + '_ {
        self.cursors.iter().map(|(id, c)| (*id, *c))
    }
}
