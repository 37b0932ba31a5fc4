use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::formats::{rankings_csv, week_from_backup, NightReport, RosterFile};
use crate::config::StorageSettings;
use crate::domain::{PlayerRecord, PlayerRegistry, Week};
use crate::errors::{load_context, parse_context, save_context};
use crate::rating::ScoringLog;

/// File-backed persistence for the roster, the running night and its exports
pub struct NightStore {
    settings: StorageSettings,
}

impl NightStore {
    /// Open the store, creating the data directory if needed
    pub fn new(settings: &StorageSettings) -> Result<Self> {
        fs::create_dir_all(&settings.data_dir)
            .with_context(|| format!("Failed to create data directory {}", settings.data_dir.display()))?;

        Ok(Self {
            settings: settings.clone(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.settings.data_dir
    }

    /// Roster records, or an empty roster when no file exists yet
    pub fn load_roster(&self) -> Result<Vec<PlayerRecord>> {
        let path = self.path(self.settings.roster_file);
        let roster: Option<RosterFile> = self.read_json_opt(&path, "player roster")?;

        match roster {
            Some(roster) => {
                info!("Loaded {} players from {}", roster.players.len(), path.display());
                Ok(roster.players)
            }
            None => {
                info!("No roster at {}, starting empty", path.display());
                Ok(Vec::new())
            }
        }
    }

    pub fn save_roster(&self, registry: &PlayerRegistry) -> Result<()> {
        let path = self.path(self.settings.roster_file);
        self.write_json(&path, &RosterFile::from_registry(registry), "player roster")?;
        info!("Saved {} players to {}", registry.len(), path.display());
        Ok(())
    }

    /// The night in progress, if one was started
    pub fn load_backup(&self) -> Result<Option<Week>> {
        let path = self.path(self.settings.backup_file);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).with_context(|| load_context("night backup", &path))?;
        let week = week_from_backup(&json).with_context(|| load_context("night backup", &path))?;
        Ok(Some(week))
    }

    pub fn save_backup(&self, week: &Week) -> Result<()> {
        let path = self.path(self.settings.backup_file);
        self.write_json(&path, week, "night backup")?;
        info!("Saved backup of {} rounds to {}", week.rounds().len(), path.display());
        Ok(())
    }

    pub fn save_scoring_log(&self, log: &ScoringLog) -> Result<PathBuf> {
        let path = self.path(self.settings.scoring_log_file);
        self.write_text(&path, &log.to_string(), "scoring log")?;
        Ok(path)
    }

    pub fn save_rankings(&self, registry: &PlayerRegistry) -> Result<PathBuf> {
        let path = self.path(self.settings.rankings_file);
        self.write_text(&path, &rankings_csv(registry)?, "rankings")?;
        Ok(path)
    }

    pub fn save_report(&self, week: &Week) -> Result<PathBuf> {
        let path = self.path(self.settings.report_file);
        self.write_json(&path, &NightReport::from_week(week), "night report")?;
        Ok(path)
    }

    /// Remove every file in the data directory
    pub fn clear(&self) -> Result<()> {
        let dir = self.data_dir();
        fs::remove_dir_all(dir).with_context(|| format!("Failed to clear {}", dir.display()))?;
        fs::create_dir_all(dir).with_context(|| format!("Failed to recreate {}", dir.display()))?;
        info!("Cleared data directory");
        Ok(())
    }

    // --- Helper Methods ---

    fn path(&self, file: &str) -> PathBuf {
        self.settings.data_dir.join(file)
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T, what: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(data).with_context(|| save_context(what, path))?;
        self.write_text(path, &json, what)
    }

    fn write_text(&self, path: &Path, contents: &str, what: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| save_context(what, path))
    }

    fn read_json_opt<T: DeserializeOwned>(&self, path: &Path, what: &str) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path).with_context(|| load_context(what, path))?;
        let data = serde_json::from_str(&json).with_context(|| parse_context(what))?;
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PairingSettings, ScoringSettings};
    use crate::domain::fixtures::even_week;
    use crate::pairing::{SeededRng, Strategy};
    use crate::rating::RankingMode;

    fn store_in(name: &str) -> NightStore {
        let settings = StorageSettings {
            data_dir: std::env::temp_dir().join(name),
            ..Default::default()
        };
        NightStore::new(&settings).unwrap()
    }

    #[test]
    fn test_missing_files_load_empty() {
        let store = store_in("pool_night_test_empty");

        assert!(store.load_roster().unwrap().is_empty());
        assert!(store.load_backup().unwrap().is_none());

        store.clear().unwrap();
    }

    #[test]
    fn test_roster_and_backup_round_trip() {
        let store = store_in("pool_night_test_round_trip");
        let mut week = even_week(4);
        week.generate_round(Strategy::Random, &mut SeededRng::from_seed(4), &PairingSettings::default())
            .unwrap();

        store.save_roster(&week.players).unwrap();
        store.save_backup(&week).unwrap();

        let roster = store.load_roster().unwrap();
        assert_eq!(roster, week.players.records());

        let restored = store.load_backup().unwrap().unwrap();
        assert_eq!(restored.rounds(), week.rounds());

        store.clear().unwrap();
    }

    #[test]
    fn test_exports_are_written() {
        let store = store_in("pool_night_test_exports");
        let mut week = even_week(2);
        week.generate_round(Strategy::Random, &mut SeededRng::from_seed(4), &PairingSettings::default())
            .unwrap();
        week.set_score(1, 1, 11, 3).unwrap();
        let log = week
            .calculate_rankings(RankingMode::Provisional, &ScoringSettings::default())
            .unwrap();

        let log_path = store.save_scoring_log(&log).unwrap();
        let csv_path = store.save_rankings(&week.players).unwrap();
        store.save_report(&week).unwrap();

        assert!(fs::read_to_string(log_path).unwrap().contains("for a ranking gain of 1"));
        assert!(fs::read_to_string(csv_path).unwrap().starts_with("Player,Played,Wins"));

        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_roster_reports_path() {
        let store = store_in("pool_night_test_corrupt");
        fs::write(store.data_dir().join("players.json"), "{ not json").unwrap();

        let error = store.load_roster().unwrap_err();
        assert!(format!("{:#}", error).contains("Failed to parse player roster"));

        store.clear().unwrap();
    }
}
