pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pairing;
pub mod rating;
pub mod services;
pub mod storage;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use cli::Cli;

use crate::cli::{Command, MemberArg, StateArg};
use crate::config::settings::AppConfig;
use crate::domain::{Player, PlayerId, Round};
use crate::rating::RankingMode;
use crate::services::{NewPlayer, NightService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn service() -> Result<NightService> {
    NightService::new(AppConfig::new())
}

pub fn handle_list_players(state: Option<StateArg>) -> Result<()> {
    let players = service()?.list_players(state.map(Into::into))?;
    if players.is_empty() {
        println!("No players");
        return Ok(());
    }

    println!("{}", format!("{:>10}  {:<24} {:>9}  {}", "ID", "Name", "Rating", "State").bold());
    for player in &players {
        print_player_row(player);
    }
    Ok(())
}

pub fn handle_add_player(name: &str, rating: f64, member: MemberArg, ap3: bool) -> Result<()> {
    let id = service()?.add_player(NewPlayer {
        name: name.to_string(),
        rating,
        member: member.into(),
        ap3,
    })?;
    println!("Added {} with ID {}", name.bold(), id.to_string().green());
    Ok(())
}

pub fn handle_set_status(id: PlayerId, state: StateArg) -> Result<()> {
    service()?.set_status(id, state.into())?;
    Ok(())
}

pub fn handle_start_night() -> Result<()> {
    let week = service()?.start_night()?;
    println!(
        "Night started on {} with {} players on the roster",
        week.date.format("%Y-%m-%d"),
        week.players.len()
    );
    Ok(())
}

pub fn handle_round(seed: Option<u64>) -> Result<()> {
    let round = service()?.generate_round(seed)?;
    print_round(&round);
    Ok(())
}

pub fn handle_score(round: u32, game: u32, first: u32, second: u32) -> Result<()> {
    let finished = service()?.record_score(round, game, first, second)?;
    if finished {
        println!("{}", "Every game so far has a result".green());
    }
    Ok(())
}

pub fn handle_add_game(round: u32, first: PlayerId, second: PlayerId) -> Result<()> {
    let game = service()?.add_game(round, first, second)?;
    println!(
        "Added game {} to round {}: {} vs {}",
        game.number(),
        round,
        first,
        second
    );
    Ok(())
}

pub fn handle_rank(final_pass: bool) -> Result<()> {
    let mode = if final_pass {
        RankingMode::Final
    } else {
        RankingMode::Provisional
    };
    let outcome = service()?.rank(mode)?;

    print!("{}", outcome.log);
    println!();
    println!("{}", format!("{:>10}  {:<24} {:>9}  {}", "ID", "Name", "Rating", "Change").bold());
    for player in outcome.standings.iter().filter(|p| p.current_rating != 0.0) {
        let change = format!("{:+.4}", player.rating_change);
        let change = if player.rating_change >= 0.0 {
            change.green()
        } else {
            change.red()
        };
        println!(
            "{:>10}  {:<24} {:>9.4}  {}",
            player.id(),
            player.name,
            player.current_rating,
            change
        );
    }

    println!("Scoring log: {}", outcome.scoring_log.display());
    println!("Rankings:    {}", outcome.rankings.display());
    if let Some(report) = outcome.report {
        println!("Report:      {}", report.display());
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn print_player_row(player: &Player) {
    let state = match player.playing_state {
        domain::PlayingState::Playing => player.playing_state.as_str().green(),
        domain::PlayingState::Away => player.playing_state.as_str().yellow(),
        domain::PlayingState::NotPlaying => player.playing_state.as_str().dimmed(),
    };
    println!(
        "{:>10}  {:<24} {:>9.4}  {}",
        player.id(),
        player.name,
        player.current_rating,
        state
    );
}

fn print_round(round: &Round) {
    println!("{}", format!("Round {}", round.number()).bold());
    for game in round.games() {
        let [first, second] = game.players();
        println!("  Game {:>2}: {} vs {}", game.number(), first, second);
    }
    if let Some(bye) = round.bye() {
        println!("  Bye: {}", bye.to_string().yellow());
    }
}
