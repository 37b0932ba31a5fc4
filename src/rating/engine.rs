use std::fmt;

use log::{debug, info};

use super::rounding::round_to_significant;
use super::snapshot::RunningTally;
use crate::config::ScoringSettings;
use crate::domain::{Baseline, PlayerId, PlayerRegistry, Round};
use crate::errors::NightResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingMode {
    /// Update current ratings only
    #[default]
    Provisional,
    /// Also lock the new ratings and counts in for next night
    Final,
}

/// Every scoring decision made during a ranking pass, one per line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringLog {
    lines: Vec<String>,
}

impl ScoringLog {
    fn push(&mut self, line: String) {
        debug!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ScoringLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Winner's rating after a decided game: a flat base, plus a share of the
/// gap when the loser was rated higher.
pub fn award_win(winner_rating: f64, loser_rating: f64, settings: &ScoringSettings) -> f64 {
    round_to_significant(
        winner_rating + win_gain(winner_rating, loser_rating, settings),
        settings.significant_figures,
    )
}

fn win_gain(winner_rating: f64, loser_rating: f64, settings: &ScoringSettings) -> f64 {
    let upset = (loser_rating - winner_rating).max(0.0);
    upset / settings.upset_divisor + settings.win_base
}

/// Replay every round of the night and write ratings, wins and games played
/// back onto the registry.
///
/// Only the history is trusted: counts start from each player's baseline and
/// ratings from their starting rating, so rerunning gives the same result.
pub fn calculate_rankings(
    rounds: &[Round],
    registry: &mut PlayerRegistry,
    mode: RankingMode,
    settings: &ScoringSettings,
) -> NightResult<ScoringLog> {
    info!("Calculating rankings over {} rounds", rounds.len());

    let mut tally = RunningTally::default();
    let mut log = ScoringLog::default();

    for round in rounds {
        register_round(round, registry, &mut tally)?;
        let frozen = tally.freeze();

        if let Some(bye) = round.bye() {
            let before = frozen.rating(bye)?;
            tally.credit(bye, settings.bye_credit)?;
            log.push(format!(
                "{} ({}) received {} for a bye",
                name_of(registry, bye)?,
                before,
                settings.bye_credit
            ));
        }

        for game in round.games() {
            let Some((winner, loser)) = game.result() else {
                continue;
            };

            let winner_rating = frozen.rating(winner)?;
            let loser_rating = frozen.rating(loser)?;
            tally.record_result(winner, loser, award_win(winner_rating, loser_rating, settings))?;

            let gain = round_to_significant(
                win_gain(winner_rating, loser_rating, settings),
                settings.significant_figures,
            );
            log.push(format!(
                "{} ({}) beat {} ({}) for a ranking gain of {}",
                name_of(registry, winner)?,
                winner_rating,
                name_of(registry, loser)?,
                loser_rating,
                gain
            ));
        }
    }

    apply_tally(&tally, registry, mode, settings)?;
    info!(
        "Rankings updated for {} players ({} scoring lines)",
        tally.entries().len(),
        log.lines().len()
    );
    Ok(log)
}

/// Seed every player in the round before anything in it is scored
fn register_round(round: &Round, registry: &PlayerRegistry, tally: &mut RunningTally) -> NightResult<()> {
    for id in round.participants() {
        if tally.is_registered(id) {
            continue;
        }
        let player = registry.player(id)?;
        tally.register(id, player.starting_rating, player.baseline.wins, player.baseline.played);
    }
    Ok(())
}

fn apply_tally(
    tally: &RunningTally,
    registry: &mut PlayerRegistry,
    mode: RankingMode,
    settings: &ScoringSettings,
) -> NightResult<()> {
    for entry in tally.entries() {
        let player = registry.player_mut(entry.id)?;
        player.current_rating = entry.rating + settings.participation_bonus;
        player.rating_change = player.current_rating - player.starting_rating;
        player.wins = entry.wins;
        player.played = entry.played;

        // Players without a game or bye tonight keep their roster values
        if mode == RankingMode::Final {
            player.starting_rating = player.current_rating;
            player.baseline = Baseline {
                played: entry.played,
                wins: entry.wins,
            };
        }
    }
    Ok(())
}

fn name_of(registry: &PlayerRegistry, id: PlayerId) -> NightResult<String> {
    Ok(registry.player(id)?.name.clone())
}
