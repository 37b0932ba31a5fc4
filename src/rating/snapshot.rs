use std::collections::HashMap;

use crate::domain::PlayerId;
use crate::errors::{NightError, NightResult};

/// Ratings captured at the start of a round. Scoring reads these and only
/// these, so the order games are scored in never matters.
#[derive(Debug, Clone)]
pub struct FrozenRatings {
    slots: HashMap<PlayerId, usize>,
    ratings: Vec<f64>,
}

impl FrozenRatings {
    pub fn rating(&self, id: PlayerId) -> NightResult<f64> {
        self.slots
            .get(&id)
            .map(|slot| self.ratings[*slot])
            .ok_or(NightError::InconsistentRatingState(id))
    }
}

/// One player's running totals for the night
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TallyEntry {
    pub id: PlayerId,
    pub rating: f64,
    pub wins: u32,
    pub played: u32,
}

/// Live totals written while replaying the night, one dense slot per
/// registered player
#[derive(Debug, Clone, Default)]
pub struct RunningTally {
    slots: HashMap<PlayerId, usize>,
    entries: Vec<TallyEntry>,
}

impl RunningTally {
    pub fn is_registered(&self, id: PlayerId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Add a player with their pre-night values. Already registered players
    /// are left alone.
    pub fn register(&mut self, id: PlayerId, rating: f64, wins: u32, played: u32) {
        if self.is_registered(id) {
            return;
        }
        self.slots.insert(id, self.entries.len());
        self.entries.push(TallyEntry {
            id,
            rating,
            wins,
            played,
        });
    }

    pub fn freeze(&self) -> FrozenRatings {
        FrozenRatings {
            slots: self.slots.clone(),
            ratings: self.entries.iter().map(|e| e.rating).collect(),
        }
    }

    fn entry_mut(&mut self, id: PlayerId) -> NightResult<&mut TallyEntry> {
        let slot = *self
            .slots
            .get(&id)
            .ok_or(NightError::InconsistentRatingState(id))?;
        Ok(&mut self.entries[slot])
    }

    pub fn credit(&mut self, id: PlayerId, amount: f64) -> NightResult<()> {
        self.entry_mut(id)?.rating += amount;
        Ok(())
    }

    /// Count a decided game and set the winner's new rating
    pub fn record_result(&mut self, winner: PlayerId, loser: PlayerId, winner_rating: f64) -> NightResult<()> {
        self.entry_mut(loser)?.played += 1;

        let entry = self.entry_mut(winner)?;
        entry.played += 1;
        entry.wins += 1;
        entry.rating = winner_rating;
        Ok(())
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }
}
