use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Player, PlayerRecord, PlayerRegistry, Round, Week};
use crate::errors::parse_context;

const RANKINGS_HEADER: [&str; 5] = ["Player", "Played", "Wins", "Points", "Change From Last Week"];

/// The persisted roster: `{"players": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFile {
    pub players: Vec<PlayerRecord>,
}

impl RosterFile {
    pub fn from_registry(registry: &PlayerRegistry) -> Self {
        Self {
            players: registry.records(),
        }
    }
}

/// End-of-night output: the roster plus the night's rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightReport {
    pub players: Vec<PlayerRecord>,
    pub week: WeekSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub date: DateTime<Utc>,
    pub rounds: Vec<Round>,
}

impl NightReport {
    pub fn from_week(week: &Week) -> Self {
        Self {
            players: week.players.records(),
            week: WeekSummary {
                date: week.date,
                rounds: week.rounds().to_vec(),
            },
        }
    }
}

/// Standings table, best rating first. Players on exactly zero are left off.
pub fn rankings_csv(registry: &PlayerRegistry) -> Result<String> {
    let mut players: Vec<&Player> = registry
        .players()
        .iter()
        .filter(|p| p.current_rating != 0.0)
        .collect();
    players.sort_by(|a, b| b.current_rating.total_cmp(&a.current_rating));

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(RANKINGS_HEADER)?;
    for player in players {
        let change = round_places(player.rating_change);
        let sign = if change >= 0.0 { "+" } else { "" };
        writer.write_record([
            player.name.clone(),
            player.played.to_string(),
            player.wins.to_string(),
            round_places(player.current_rating).to_string(),
            format!("{}{}", sign, change),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush rankings CSV")?;
    String::from_utf8(bytes).context("Rankings CSV is not valid UTF-8")
}

/// Four decimal places, with negative zero folded into zero
fn round_places(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0 + 0.0
}

/// Rebuild a week from its backup JSON, checking every player reference
pub fn week_from_backup(json: &str) -> Result<Week> {
    let mut week: Week = serde_json::from_str(json).with_context(|| parse_context("night backup"))?;
    week.relink().context("Backup refers to players that are not in it")?;
    Ok(week)
}
