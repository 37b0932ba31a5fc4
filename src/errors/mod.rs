use thiserror::Error;

use crate::domain::PlayerId;

/// Failures raised by the pairing and ranking core.
///
/// None of these are transient; callers propagate them and never retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NightError {
    #[error("Player {0} not found")]
    NotFound(PlayerId),

    #[error("Player ID {0} is already assigned")]
    DuplicateId(PlayerId),

    #[error("Index {index} is out of range for {len} players")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Round {0} does not exist")]
    RoundNotFound(u32),

    #[error("Game {game} does not exist in round {round}")]
    GameNotFound { round: u32, game: u32 },

    #[error("Round could not be generated: {0}")]
    RoundGenerationFailed(String),

    #[error("Player {0} not in rating snapshot during ranking calculation")]
    InconsistentRatingState(PlayerId),

    #[error("No candidates to choose from when selecting {0}")]
    EmptyCandidates(&'static str),

    #[error("Invalid game: {0}")]
    InvalidGame(String),
}

pub type NightResult<T> = Result<T, NightError>;

/// Add context to load errors
pub fn load_context(what: &str, path: &std::path::Path) -> String {
    format!("Failed to load {} from: {}", what, path.display())
}

/// Add context to save errors
pub fn save_context(what: &str, path: &std::path::Path) -> String {
    format!("Failed to save {} to: {}", what, path.display())
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}
