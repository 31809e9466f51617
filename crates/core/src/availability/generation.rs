//! Last-issued-wins bookkeeping for availability lookups.
//!
//! When the customer changes artist or date while a lookup is still in
//! flight, the older response may arrive last. Each lookup takes a
//! [`Generation`] when it starts and its result is only applied while that
//! generation is still the newest one issued.
//!
//! This is for a client that keeps a selection across lookups, such as a
//! booking form. The HTTP handlers are stateless and do not use it.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    availability::{
        slots::SlotAvailability,
        taken::{fetch_taken_slots, FailMode, TakenSlotsSource},
    },
    errors::{TimeError, TimeResult},
    models::opening_hours::OpeningHours,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: AtomicU64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub artist_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Default)]
struct BoardState {
    selection: Option<Selection>,
    availability: Option<SlotAvailability>,
}

/// The booking form's current (artist, date) choice and the slots shown for it.
#[derive(Debug, Default)]
pub struct SlotBoard {
    generations: RequestGenerations,
    state: Mutex<BoardState>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to `selection`, clearing the slots of the previous one.
    pub fn select(&self, selection: Selection) -> TimeResult<Generation> {
        let mut state = self.lock()?;
        let generation = self.generations.issue();
        state.selection = Some(selection);
        state.availability = None;
        Ok(generation)
    }

    /// Stores `availability` if `generation` is still the newest selection.
    /// Returns whether it was applied.
    pub fn apply(&self, generation: Generation, availability: SlotAvailability) -> TimeResult<bool> {
        let mut state = self.lock()?;
        if !self.generations.is_current(generation) {
            return Ok(false);
        }
        state.availability = Some(availability);
        Ok(true)
    }

    pub fn current(&self) -> TimeResult<Option<(Selection, SlotAvailability)>> {
        let state = self.lock()?;
        Ok(state.selection.zip(state.availability.clone()))
    }

    /// Selects, fetches taken times, resolves slots and applies the result
    /// unless a newer selection was made in the meantime.
    pub async fn load<S>(
        &self,
        selection: Selection,
        opening_hours: Option<&OpeningHours>,
        source: &S,
        mode: FailMode,
    ) -> TimeResult<bool>
    where
        S: TakenSlotsSource + ?Sized,
    {
        let generation = self.select(selection)?;
        let taken = fetch_taken_slots(source, selection.artist_id, selection.date, mode).await?;
        let availability = SlotAvailability::resolve(opening_hours, selection.date, &taken);
        self.apply(generation, availability)
    }

    fn lock(&self) -> TimeResult<std::sync::MutexGuard<'_, BoardState>> {
        self.state
            .lock()
            .map_err(|_| TimeError::Internal("slot board lock poisoned".into()))
    }
}
