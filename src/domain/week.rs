use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::game::{Game, Side};
use super::player::{ByeStatus, PlayerRecord};
use super::registry::PlayerRegistry;
use super::round::Round;
use super::PlayerId;
use crate::config::{PairingSettings, ScoringSettings};
use crate::errors::{NightError, NightResult};
use crate::pairing::{self, RandomSource, Strategy};
use crate::rating::{self, RankingMode, ScoringLog};

/// One night: the registry and every round generated so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    pub date: DateTime<Utc>,
    pub players: PlayerRegistry,
    rounds: Vec<Round>,
    #[serde(rename = "nextround")]
    next_round: u32,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub saved: bool,
}

impl Week {
    pub fn new(players: PlayerRegistry) -> Self {
        Self::with_date(players, Utc::now())
    }

    pub fn with_date(players: PlayerRegistry, date: DateTime<Utc>) -> Self {
        Self {
            date,
            players,
            rounds: Vec::new(),
            next_round: 1,
            finished: false,
            saved: false,
        }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn next_round(&self) -> u32 {
        self.next_round
    }

    pub fn round(&self, number: u32) -> NightResult<&Round> {
        number
            .checked_sub(1)
            .and_then(|slot| self.rounds.get(slot as usize))
            .ok_or(NightError::RoundNotFound(number))
    }

    fn round_mut(&mut self, number: u32) -> NightResult<&mut Round> {
        number
            .checked_sub(1)
            .and_then(|slot| self.rounds.get_mut(slot as usize))
            .ok_or(NightError::RoundNotFound(number))
    }

    /// Generate the next round, record everyone's round bookkeeping and
    /// append it
    pub fn generate_round<R: RandomSource>(
        &mut self,
        strategy: Strategy,
        rng: &mut R,
        settings: &PairingSettings,
    ) -> NightResult<&Round> {
        let round = pairing::generate_round(self, strategy, rng, settings)?;
        self.players.set_round_player_info(round.bye())?;

        info!(
            "Round {} generated with {} games{}",
            round.number(),
            round.games().len(),
            round
                .bye()
                .map(|id| format!(", bye for {}", id))
                .unwrap_or_default()
        );

        self.rounds.push(round);
        self.next_round += 1;
        self.finished = false;

        let last = self.rounds.len() - 1;
        Ok(&self.rounds[last])
    }

    /// Add a game by hand to a round that already exists.
    ///
    /// A player who had that round's bye loses it and gets their
    /// games-since-bye count back before the new game is counted.
    pub fn add_manual_game(&mut self, round: u32, first: PlayerId, second: PlayerId) -> NightResult<&Game> {
        if first == second {
            return Err(NightError::InvalidGame(format!(
                "player {} cannot play themself",
                first
            )));
        }
        self.players.player(first)?;
        self.players.player(second)?;

        let revoked = self
            .round(round)?
            .bye()
            .filter(|bye| *bye == first || *bye == second);
        if let Some(bye) = revoked {
            // Only the latest bye's carry is kept
            let later_bye = self.players.player(bye)?
                .byes
                .iter()
                .skip(round as usize)
                .any(|status| *status == ByeStatus::Took);
            if later_bye {
                return Err(NightError::InvalidGame(format!(
                    "player {} has taken a bye since round {}",
                    bye, round
                )));
            }
        }

        let target = self.round_mut(round)?;
        if revoked.is_some() {
            target.set_bye(None);
        }
        let number = target.highest_game_number() + 1;
        target.add_game(Game::new([first, second], round, number));

        if let Some(bye) = revoked {
            info!("Revoked the round {} bye of player {}", round, bye);
            self.players.restore_bye(bye)?;
        }
        self.players.set_new_game_player_info(round, [first, second])?;
        self.finished = false;

        self.round(round)?
            .game(number)
            .ok_or(NightError::GameNotFound { round, game: number })
    }

    pub fn game_mut(&mut self, round: u32, game: u32) -> NightResult<&mut Game> {
        self.round_mut(round)?
            .game_mut(game)
            .ok_or(NightError::GameNotFound { round, game })
    }

    pub fn set_score(&mut self, round: u32, game: u32, first: u32, second: u32) -> NightResult<()> {
        self.game_mut(round, game)?.set_scores(first, second);
        self.check_finished();
        Ok(())
    }

    /// Enter one side's score, or clear it with `None`
    pub fn set_side_score(&mut self, round: u32, game: u32, side: Side, score: Option<u32>) -> NightResult<()> {
        self.game_mut(round, game)?.set_score(side, score);
        self.check_finished();
        Ok(())
    }

    /// Refresh `finished`: true once every game of every round is decided
    pub fn check_finished(&mut self) -> bool {
        self.finished = self.rounds.iter().all(Round::is_complete);
        self.finished
    }

    /// Bye-takers in round order, repeats included
    pub fn players_taken_byes(&self) -> Vec<PlayerId> {
        self.rounds.iter().filter_map(Round::bye).collect()
    }

    /// Register a player mid-night or update an existing one's details
    pub fn add_player<R: RandomSource>(
        &mut self,
        record: PlayerRecord,
        rng: &mut R,
        seed_range: u32,
    ) -> NightResult<()> {
        let rounds_so_far = self.rounds.len();
        self.players.upsert_record(record, rounds_so_far, rng, seed_range)
    }

    pub fn calculate_rankings(&mut self, mode: RankingMode, settings: &ScoringSettings) -> NightResult<ScoringLog> {
        rating::calculate_rankings(&self.rounds, &mut self.players, mode, settings)
    }

    /// Check a week rebuilt from a backup: rounds numbered in order, every
    /// game and bye naming a registered player. Round histories are padded
    /// and the round counter re-derived.
    pub fn relink(&mut self) -> NightResult<()> {
        for (slot, round) in self.rounds.iter().enumerate() {
            let expected = slot as u32 + 1;
            if round.number() != expected {
                return Err(NightError::RoundNotFound(expected));
            }
            for game in round.games() {
                if game.round() != expected {
                    return Err(NightError::GameNotFound {
                        round: expected,
                        game: game.number(),
                    });
                }
            }
            for id in round.participants() {
                self.players.player(id)?;
            }
        }

        let expected_next = self.rounds.len() as u32 + 1;
        if self.next_round != expected_next {
            warn!(
                "Backup round counter was {}, resetting to {}",
                self.next_round, expected_next
            );
            self.next_round = expected_next;
        }
        self.players.pad_all_rounds(self.rounds.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{even_week, playing_week};
    use crate::pairing::SeededRng;

    fn three_player_week_with_bye() -> Week {
        let mut week = playing_week(&[(1, "Ada", 0.0), (2, "Bea", 0.0), (3, "Cy", 0.0)]);
        week.generate_round(Strategy::Random, &mut SeededRng::from_seed(5), &PairingSettings::default())
            .unwrap();
        week
    }

    #[test]
    fn test_generate_round_advances_counter() {
        let mut week = even_week(4);
        let settings = PairingSettings::default();
        let mut rng = SeededRng::from_seed(11);

        week.generate_round(Strategy::Auto, &mut rng, &settings).unwrap();
        week.generate_round(Strategy::Auto, &mut rng, &settings).unwrap();

        assert_eq!(week.rounds().len(), 2);
        assert_eq!(week.next_round(), 3);
        assert_eq!(week.round(2).unwrap().number(), 2);
        for player in week.players.players() {
            assert_eq!(player.in_rounds, vec![true, true]);
        }
    }

    #[test]
    fn test_round_lookup_out_of_range() {
        let week = even_week(2);
        assert_eq!(week.round(0).err(), Some(NightError::RoundNotFound(0)));
        assert_eq!(week.round(1).err(), Some(NightError::RoundNotFound(1)));
    }

    #[test]
    fn test_set_score_and_finish() {
        let mut week = even_week(4);
        week.generate_round(Strategy::Random, &mut SeededRng::from_seed(2), &PairingSettings::default())
            .unwrap();

        week.set_score(1, 1, 11, 4).unwrap();
        assert!(!week.finished);

        week.set_score(1, 2, 2, 11).unwrap();
        assert!(week.finished);

        assert_eq!(
            week.set_score(1, 3, 1, 0),
            Err(NightError::GameNotFound { round: 1, game: 3 })
        );
    }

    #[test]
    fn test_manual_game_revokes_bye() {
        let mut week = three_player_week_with_bye();
        let bye = week.round(1).unwrap().bye().unwrap();
        let other = week.players.players().iter().map(|p| p.id()).find(|id| *id != bye).unwrap();

        let game = week.add_manual_game(1, bye, other).unwrap();
        assert_eq!(game.number(), 2);

        assert_eq!(week.round(1).unwrap().bye(), None);
        let player = week.players.player(bye).unwrap();
        assert_eq!(player.byes, vec![ByeStatus::SomeoneElse]);
        assert_eq!(player.games_since_bye, 1);
        assert_eq!(player.temp_games_since_bye, None);
        assert!(week.players_taken_byes().is_empty());
    }

    #[test]
    fn test_manual_game_cannot_revoke_an_older_bye() {
        let mut week = three_player_week_with_bye();
        let mut rng = SeededRng::from_seed(8);
        for _ in 2..=4 {
            week.generate_round(Strategy::Auto, &mut rng, &PairingSettings::default())
                .unwrap();
        }
        // Bye rotation with three players brings round 1's bye back in round 4
        let bye = week.round(1).unwrap().bye().unwrap();
        assert_eq!(week.round(4).unwrap().bye(), Some(bye));
        let other = week.players.players().iter().map(|p| p.id()).find(|id| *id != bye).unwrap();

        let result = week.add_manual_game(1, bye, other);

        assert!(matches!(result, Err(NightError::InvalidGame(_))));
        assert_eq!(week.round(1).unwrap().bye(), Some(bye));
        assert_eq!(week.round(1).unwrap().games().len(), 1);

        week.add_manual_game(4, bye, other).unwrap();
        assert_eq!(week.round(4).unwrap().bye(), None);
        assert_eq!(week.players.player(bye).unwrap().games_since_bye, 3);
    }

    #[test]
    fn test_manual_game_rejects_self_pairing() {
        let mut week = three_player_week_with_bye();
        assert!(matches!(week.add_manual_game(1, 2, 2), Err(NightError::InvalidGame(_))));
        assert_eq!(week.add_manual_game(1, 2, 9).err(), Some(NightError::NotFound(9)));
        assert_eq!(week.add_manual_game(4, 1, 2).err(), Some(NightError::RoundNotFound(4)));
    }

    #[test]
    fn test_late_player_is_aligned() {
        let mut week = even_week(4);
        let mut rng = SeededRng::from_seed(8);
        week.generate_round(Strategy::Random, &mut rng, &PairingSettings::default())
            .unwrap();

        week.add_player(PlayerRecord::new(50, "Late", 3.0), &mut rng, 1000)
            .unwrap();

        let late = week.players.player(50).unwrap();
        assert_eq!(late.in_rounds, vec![false]);
        assert_eq!(late.byes, vec![ByeStatus::NotApplicable]);
    }

    #[test]
    fn test_relink_rejects_dangling_player() {
        let mut week = even_week(4);
        week.generate_round(Strategy::Random, &mut SeededRng::from_seed(3), &PairingSettings::default())
            .unwrap();

        let mut json = serde_json::to_value(&week).unwrap();
        json["rounds"][0]["games"][0]["players"][0] = serde_json::json!(77);
        let mut restored: Week = serde_json::from_value(json).unwrap();

        assert_eq!(restored.relink(), Err(NightError::NotFound(77)));
    }

    #[test]
    fn test_relink_repairs_round_counter() {
        let mut week = even_week(2);
        week.generate_round(Strategy::Random, &mut SeededRng::from_seed(3), &PairingSettings::default())
            .unwrap();

        let mut json = serde_json::to_value(&week).unwrap();
        json["nextround"] = serde_json::json!(9);
        let mut restored: Week = serde_json::from_value(json).unwrap();

        restored.relink().unwrap();
        assert_eq!(restored.next_round(), 2);
    }
}
