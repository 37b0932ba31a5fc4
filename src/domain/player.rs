use log::warn;
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// The membership a player holds with the club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    #[default]
    None,
    Member,
    Alumni,
}

impl MembershipType {
    pub fn as_str(&self) -> &str {
        match self {
            MembershipType::None => "none",
            MembershipType::Member => "member",
            MembershipType::Alumni => "alumni",
        }
    }
}

/// Whether a player is taking part in tonight's rounds. Mutated by the UI
/// between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayingState {
    Playing,
    Away,
    #[default]
    NotPlaying,
}

impl PlayingState {
    pub fn as_str(&self) -> &str {
        match self {
            PlayingState::Playing => "playing",
            PlayingState::Away => "away",
            PlayingState::NotPlaying => "not playing",
        }
    }
}

/// What a round's bye meant for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByeStatus {
    /// The player took the bye
    Took,
    /// The player played while someone else took the bye
    SomeoneElse,
    /// The player sat the round out, or nobody took a bye
    NotApplicable,
}

/// The persisted shape of a player, as stored in the roster file.
///
/// Night-local and UI-local state (current rating, round history, status,
/// weekly seed, bye carry) never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    #[serde(rename = "startingelo")]
    pub starting_rating: f64,
    #[serde(default)]
    pub member: MembershipType,
    #[serde(default)]
    pub ap3: bool,
    #[serde(default)]
    pub paid: bool,
    #[serde(rename = "elochange", default)]
    pub rating_change: f64,
    #[serde(default)]
    pub played: u32,
    #[serde(rename = "gamessincebye", default)]
    pub games_since_bye: u32,
    #[serde(default)]
    pub wins: u32,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, name: &str, starting_rating: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            starting_rating,
            member: MembershipType::None,
            ap3: false,
            paid: false,
            rating_change: 0.0,
            played: 0,
            games_since_bye: 0,
            wins: 0,
        }
    }
}

/// Cumulative counts as they stood when the night began
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Baseline {
    pub played: u32,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    pub name: String,
    pub member: MembershipType,
    pub ap3: bool,
    pub paid: bool,

    pub starting_rating: f64,
    pub current_rating: f64,
    pub rating_change: f64,

    pub played: u32,
    pub wins: u32,
    pub games_since_bye: u32,
    /// Value of `games_since_bye` before the last bye reset it
    pub temp_games_since_bye: Option<u32>,
    pub baseline: Baseline,

    pub in_rounds: Vec<bool>,
    pub byes: Vec<ByeStatus>,
    /// Per-night ordering seed, only used to order games
    pub seed: u32,
    pub playing_state: PlayingState,
}

impl Player {
    pub fn from_record(record: PlayerRecord, seed: u32) -> Self {
        let starting_rating = finite_or_zero(record.starting_rating, record.id);

        Self {
            id: record.id,
            name: record.name,
            member: record.member,
            ap3: record.ap3,
            paid: record.paid,
            starting_rating,
            current_rating: starting_rating,
            rating_change: 0.0,
            played: record.played,
            wins: record.wins,
            games_since_bye: record.games_since_bye,
            temp_games_since_bye: None,
            baseline: Baseline {
                played: record.played,
                wins: record.wins,
            },
            in_rounds: Vec::new(),
            byes: Vec::new(),
            seed,
            playing_state: PlayingState::NotPlaying,
        }
    }

    /// A player joining once `rounds_so_far` rounds already exist. Their
    /// round history is padded so it lines up with everyone else's.
    pub fn joining(record: PlayerRecord, seed: u32, rounds_so_far: usize) -> Self {
        let mut player = Self::from_record(record, seed);
        player.pad_rounds(rounds_so_far);
        player
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_playing(&self) -> bool {
        self.playing_state == PlayingState::Playing
    }

    pub fn record(&self) -> PlayerRecord {
        PlayerRecord {
            id: self.id,
            name: self.name.clone(),
            starting_rating: self.starting_rating,
            member: self.member,
            ap3: self.ap3,
            paid: self.paid,
            rating_change: self.rating_change,
            played: self.played,
            games_since_bye: self.games_since_bye,
            wins: self.wins,
        }
    }

    /// Replace the persisted fields, keeping tonight's state
    pub fn apply_record(&mut self, record: PlayerRecord) {
        self.name = record.name;
        self.member = record.member;
        self.ap3 = record.ap3;
        self.paid = record.paid;
        self.starting_rating = finite_or_zero(record.starting_rating, self.id);
        self.current_rating = self.starting_rating;
        self.rating_change = 0.0;
        self.played = record.played;
        self.wins = record.wins;
        self.baseline = Baseline {
            played: record.played,
            wins: record.wins,
        };
        self.games_since_bye = record.games_since_bye;
    }

    pub(crate) fn pad_rounds(&mut self, rounds: usize) {
        while self.in_rounds.len() < rounds {
            self.in_rounds.push(false);
        }
        while self.byes.len() < rounds {
            self.byes.push(ByeStatus::NotApplicable);
        }
    }

    pub(crate) fn take_bye(&mut self) {
        self.temp_games_since_bye = Some(self.games_since_bye);
        self.games_since_bye = 0;
    }
}

fn finite_or_zero(rating: f64, id: PlayerId) -> f64 {
    if rating.is_finite() {
        rating
    } else {
        warn!("Player {} has a non-finite rating, resetting to 0", id);
        0.0
    }
}
