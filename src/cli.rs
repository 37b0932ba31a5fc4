use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::{MembershipType, PlayerId, PlayingState};

#[derive(Parser, Debug)]
#[command(name = "pool-night", author, version, about = "Pairings and rankings for a pool night")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Manage the player roster and tonight's player states
    Players {
        #[clap(subcommand)]
        command: PlayersCommand,
    },
    /// Manage the night itself
    Night {
        #[clap(subcommand)]
        command: NightCommand,
    },
    /// Generate the next round (random first, ranked afterwards)
    Round {
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Enter the score of a game
    Score {
        round: u32,
        game: u32,
        first: u32,
        second: u32,
    },
    /// Add a game by hand to an existing round
    AddGame {
        round: u32,
        first: PlayerId,
        second: PlayerId,
    },
    /// Recalculate rankings and write the scoring log and rankings table
    Rank {
        /// Lock the new ratings in and write the end-of-night report
        #[arg(long = "final")]
        final_pass: bool,
    },
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PlayersCommand {
    /// List players, optionally only those in one state
    List {
        #[arg(long, value_enum)]
        state: Option<StateArg>,
    },
    /// Add a player to the roster
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        rating: f64,
        #[arg(long, value_enum, default_value_t = MemberArg::None)]
        member: MemberArg,
        #[arg(long)]
        ap3: bool,
    },
    /// Set whether a player is playing tonight
    Status {
        id: PlayerId,
        #[arg(value_enum)]
        state: StateArg,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum NightCommand {
    /// Start a fresh night from the roster
    Start,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum StateArg {
    Playing,
    Away,
    NotPlaying,
}

impl From<StateArg> for PlayingState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Playing => PlayingState::Playing,
            StateArg::Away => PlayingState::Away,
            StateArg::NotPlaying => PlayingState::NotPlaying,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum MemberArg {
    None,
    Member,
    Alumni,
}

impl From<MemberArg> for MembershipType {
    fn from(member: MemberArg) -> Self {
        match member {
            MemberArg::None => MembershipType::None,
            MemberArg::Member => MembershipType::Member,
            MemberArg::Alumni => MembershipType::Alumni,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("pool-night").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(
            parse(&["score", "2", "3", "11", "7"]),
            Command::Score {
                round: 2,
                game: 3,
                first: 11,
                second: 7
            }
        );
    }

    #[test]
    fn test_parse_player_status() {
        assert_eq!(
            parse(&["players", "status", "42", "not-playing"]),
            Command::Players {
                command: PlayersCommand::Status {
                    id: 42,
                    state: StateArg::NotPlaying
                }
            }
        );
    }

    #[test]
    fn test_parse_final_rank_and_add_game() {
        assert_eq!(parse(&["rank", "--final"]), Command::Rank { final_pass: true });
        assert_eq!(
            parse(&["add-game", "1", "4", "5"]),
            Command::AddGame {
                round: 1,
                first: 4,
                second: 5
            }
        );
    }
}
