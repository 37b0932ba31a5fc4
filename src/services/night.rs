use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

use crate::config::settings::AppConfig;
use crate::domain::{Game, MembershipType, Player, PlayerId, PlayerRecord, PlayerRegistry, PlayingState, Round, Week};
use crate::pairing::{RandomSource, SeededRng, Strategy, SystemRng};
use crate::rating::{RankingMode, ScoringLog};
use crate::storage::NightStore;

/// Details for a player added from the command line
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub rating: f64,
    pub member: MembershipType,
    pub ap3: bool,
}

/// Files written by a ranking pass, and the standings it produced
#[derive(Debug)]
pub struct RankingOutcome {
    pub log: ScoringLog,
    pub scoring_log: PathBuf,
    pub rankings: PathBuf,
    pub report: Option<PathBuf>,
    pub standings: Vec<Player>,
}

/// Runs a night on top of the file store. Every operation loads the night
/// backup, applies one change and writes it back.
pub struct NightService {
    config: AppConfig,
    store: NightStore,
}

impl NightService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = NightStore::new(&config.storage)?;
        Ok(Self { config, store })
    }

    /// Players of the night in progress, or of the roster when no night has
    /// been started
    pub fn list_players(&self, state: Option<PlayingState>) -> Result<Vec<Player>> {
        let registry = match self.store.load_backup()? {
            Some(week) => week.players,
            None => self.roster_registry(&mut SystemRng)?,
        };

        Ok(registry
            .players()
            .iter()
            .filter(|p| state.is_none_or(|s| p.playing_state == s))
            .cloned()
            .collect())
    }

    /// Add a player to the roster, and to tonight's night if one is running
    pub fn add_player(&self, new_player: NewPlayer) -> Result<PlayerId> {
        let mut rng = SystemRng;
        let mut roster = self.roster_registry(&mut rng)?;
        let mut week = self.store.load_backup()?;

        // The ID must be free in both the roster and tonight's registry
        let mut player = roster.new_player(&mut rng, &self.config.pairing);
        while week.as_ref().is_some_and(|w| w.players.is_id_assigned(player.id())) {
            player = roster.new_player(&mut rng, &self.config.pairing);
        }

        let record = PlayerRecord {
            member: new_player.member,
            ap3: new_player.ap3,
            ..PlayerRecord::new(player.id(), &new_player.name, new_player.rating)
        };
        let id = record.id;

        roster.upsert_record(record.clone(), 0, &mut rng, self.config.pairing.seed_range)?;
        self.store.save_roster(&roster)?;

        if let Some(week) = week.as_mut() {
            week.add_player(record, &mut rng, self.config.pairing.seed_range)?;
            self.store.save_backup(week)?;
        }

        info!("Added player {} ({})", new_player.name, id);
        Ok(id)
    }

    pub fn set_status(&self, id: PlayerId, state: PlayingState) -> Result<()> {
        let mut week = self.require_week()?;
        week.players.set_playing_state(id, state)?;
        self.store.save_backup(&week)?;
        info!("Player {} is now {}", id, state.as_str());
        Ok(())
    }

    /// Start a fresh night from the roster, replacing any backup
    pub fn start_night(&self) -> Result<Week> {
        let registry = self.roster_registry(&mut SystemRng)?;
        let week = Week::new(registry);
        self.store.save_backup(&week)?;
        info!("Started a night for {} players", week.players.len());
        Ok(week)
    }

    /// Generate the next round; random first, ranked afterwards. A seed
    /// makes the draw reproducible.
    pub fn generate_round(&self, seed: Option<u64>) -> Result<Round> {
        match seed {
            Some(seed) => self.generate_with(&mut SeededRng::from_seed(seed)),
            None => self.generate_with(&mut SystemRng),
        }
    }

    fn generate_with<R: RandomSource>(&self, rng: &mut R) -> Result<Round> {
        let mut week = self.require_week()?;
        if week.players.active_players().is_empty() {
            bail!("Nobody is marked as playing");
        }

        let round = week
            .generate_round(Strategy::Auto, rng, &self.config.pairing)
            .context("Failed to generate round")?
            .clone();
        self.store.save_backup(&week)?;
        Ok(round)
    }

    pub fn record_score(&self, round: u32, game: u32, first: u32, second: u32) -> Result<bool> {
        let mut week = self.require_week()?;
        week.set_score(round, game, first, second)?;
        self.store.save_backup(&week)?;
        Ok(week.finished)
    }

    pub fn add_game(&self, round: u32, first: PlayerId, second: PlayerId) -> Result<Game> {
        let mut week = self.require_week()?;
        let game = week.add_manual_game(round, first, second)?.clone();
        self.store.save_backup(&week)?;
        Ok(game)
    }

    /// Recalculate the night's rankings and write the exports. The final
    /// pass also writes the night report and saves the roster with the new
    /// ratings locked in.
    pub fn rank(&self, mode: RankingMode) -> Result<RankingOutcome> {
        let mut week = self.require_week()?;
        let log = week.calculate_rankings(mode, &self.config.scoring)?;

        let scoring_log = self.store.save_scoring_log(&log)?;
        let rankings = self.store.save_rankings(&week.players)?;
        let report = match mode {
            RankingMode::Final => {
                let report = self.store.save_report(&week)?;
                self.store.save_roster(&week.players)?;
                week.saved = true;
                Some(report)
            }
            RankingMode::Provisional => None,
        };
        self.store.save_backup(&week)?;

        let mut standings = week.players.players().to_vec();
        standings.sort_by(|a, b| b.current_rating.total_cmp(&a.current_rating));

        Ok(RankingOutcome {
            log,
            scoring_log,
            rankings,
            report,
            standings,
        })
    }

    fn roster_registry<R: RandomSource>(&self, rng: &mut R) -> Result<PlayerRegistry> {
        let records = self.store.load_roster()?;
        Ok(PlayerRegistry::from_records(records, rng, self.config.pairing.seed_range))
    }

    fn require_week(&self) -> Result<Week> {
        match self.store.load_backup()? {
            Some(week) => Ok(week),
            None => bail!("No night in progress, run `night start` first"),
        }
    }
}
