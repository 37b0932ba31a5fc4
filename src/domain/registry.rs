use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::player::{ByeStatus, Player, PlayerRecord, PlayingState};
use super::PlayerId;
use crate::config::PairingSettings;
use crate::errors::{NightError, NightResult};
use crate::pairing::RandomSource;

/// Every player known to the club, with their per-night bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from roster records, drawing a fresh weekly seed for everyone.
    /// Later records with an ID already seen are dropped.
    pub fn from_records<R: RandomSource>(
        records: Vec<PlayerRecord>,
        rng: &mut R,
        seed_range: u32,
    ) -> Self {
        let mut registry = Self::new();

        for record in records {
            if registry.is_id_assigned(record.id) {
                warn!("Skipping duplicate player ID {} ({})", record.id, record.name);
                continue;
            }
            let seed = rng.below(seed_range);
            registry.players.push(Player::from_record(record, seed));
        }

        registry
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, id: PlayerId) -> NightResult<&Player> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or(NightError::NotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> NightResult<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(NightError::NotFound(id))
    }

    pub fn index_of(&self, id: PlayerId) -> NightResult<usize> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or(NightError::NotFound(id))
    }

    pub fn player_at(&self, index: usize) -> NightResult<&Player> {
        self.players.get(index).ok_or(NightError::IndexOutOfRange {
            index,
            len: self.players.len(),
        })
    }

    pub fn is_id_assigned(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }

    /// First player whose name contains `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let needle = name.to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle))
    }

    pub fn active_players(&self) -> Vec<&Player> {
        self.players_with_state(PlayingState::Playing)
    }

    pub fn players_with_state(&self, state: PlayingState) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.playing_state == state)
            .collect()
    }

    /// A blank player with an ID nobody else holds
    pub fn new_player<R: RandomSource>(&self, rng: &mut R, settings: &PairingSettings) -> Player {
        let mut id = rng.below(settings.max_player_id);
        while self.is_id_assigned(id) {
            id = rng.below(settings.max_player_id);
        }

        let seed = rng.below(settings.seed_range);
        Player::from_record(PlayerRecord::new(id, "", 0.0), seed)
    }

    pub fn add_player(&mut self, player: Player) -> NightResult<()> {
        if self.is_id_assigned(player.id()) {
            return Err(NightError::DuplicateId(player.id()));
        }
        debug!("Registered player {} ({})", player.id(), player.name);
        self.players.push(player);
        Ok(())
    }

    /// Update an existing player's persisted fields, or register a new player
    /// joining after `rounds_so_far` rounds
    pub fn upsert_record<R: RandomSource>(
        &mut self,
        record: PlayerRecord,
        rounds_so_far: usize,
        rng: &mut R,
        seed_range: u32,
    ) -> NightResult<()> {
        match self.player_mut(record.id) {
            Ok(existing) => {
                existing.apply_record(record);
                Ok(())
            }
            Err(_) => {
                let seed = rng.below(seed_range);
                self.add_player(Player::joining(record, seed, rounds_so_far))
            }
        }
    }

    pub fn set_playing_state(&mut self, id: PlayerId, state: PlayingState) -> NightResult<()> {
        self.player_mut(id)?.playing_state = state;
        Ok(())
    }

    /// Draw new ordering seeds for a new night
    pub fn reseed_week<R: RandomSource>(&mut self, rng: &mut R, seed_range: u32) {
        for player in &mut self.players {
            player.seed = rng.below(seed_range);
        }
    }

    /// Round-start bookkeeping, run once per generated round.
    ///
    /// Players sitting out get `false` / not-applicable. Eligible players get
    /// `true`; the bye-taker has their games-since-bye reset (keeping the old
    /// value as a carry) and everyone else eligible has it incremented.
    pub fn set_round_player_info(&mut self, bye: Option<PlayerId>) -> NightResult<()> {
        if let Some(bye_id) = bye {
            self.player(bye_id)?;
        }

        for player in &mut self.players {
            if !player.is_playing() {
                player.in_rounds.push(false);
                player.byes.push(ByeStatus::NotApplicable);
                continue;
            }

            player.in_rounds.push(true);
            match bye {
                Some(bye_id) if bye_id == player.id() => {
                    player.byes.push(ByeStatus::Took);
                    player.take_bye();
                }
                Some(_) => {
                    player.byes.push(ByeStatus::SomeoneElse);
                    player.games_since_bye += 1;
                }
                None => {
                    player.byes.push(ByeStatus::NotApplicable);
                    player.games_since_bye += 1;
                }
            }
        }

        Ok(())
    }

    /// Bookkeeping for a game added by hand to an existing round
    pub fn set_new_game_player_info(&mut self, round: u32, players: [PlayerId; 2]) -> NightResult<()> {
        let slot = round_slot(round)?;

        for id in players {
            let player = self.player_mut(id)?;
            player.pad_rounds(slot + 1);
            player.games_since_bye += 1;
            player.in_rounds[slot] = true;
            player.byes[slot] = ByeStatus::SomeoneElse;
        }

        Ok(())
    }

    /// Undo a bye reset, putting back the games-since-bye carry
    pub fn restore_bye(&mut self, id: PlayerId) -> NightResult<()> {
        let player = self.player_mut(id)?;
        if let Some(previous) = player.temp_games_since_bye.take() {
            debug!("Restoring games since bye for {} to {}", id, previous);
            player.games_since_bye = previous;
        }
        Ok(())
    }

    /// Line every player's round history up with `rounds` rounds
    pub fn pad_all_rounds(&mut self, rounds: usize) {
        for player in &mut self.players {
            player.pad_rounds(rounds);
        }
    }

    /// The persistable roster, volatile fields stripped
    pub fn records(&self) -> Vec<PlayerRecord> {
        self.players.iter().map(Player::record).collect()
    }
}

fn round_slot(round: u32) -> NightResult<usize> {
    if round == 0 {
        return Err(NightError::RoundNotFound(round));
    }
    Ok(round as usize - 1)
}
