use anyhow::Result;

use pool_night::cli::{Command, NightCommand, PlayersCommand};
use pool_night::{
    handle_add_game, handle_add_player, handle_completions, handle_list_players, handle_rank, handle_round,
    handle_score, handle_set_status, handle_start_night, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Players { command } => match command {
            PlayersCommand::List { state } => handle_list_players(*state),
            PlayersCommand::Add {
                name,
                rating,
                member,
                ap3,
            } => handle_add_player(name, *rating, *member, *ap3),
            PlayersCommand::Status { id, state } => handle_set_status(*id, *state),
        },
        Command::Night { command } => match command {
            NightCommand::Start => handle_start_night(),
        },
        Command::Round { seed } => handle_round(*seed),
        Command::Score {
            round,
            game,
            first,
            second,
        } => handle_score(*round, *game, *first, *second),
        Command::AddGame { round, first, second } => handle_add_game(*round, *first, *second),
        Command::Rank { final_pass } => handle_rank(*final_pass),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
