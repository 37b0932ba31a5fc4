use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PairingSettings {
    /// Once this many (or fewer) players remain, every full pairing is enumerated
    pub exhaustive_threshold: usize,
    pub repeat_constant: f64,
    pub repeat_factor: f64,
    /// Weekly ordering seeds are drawn from `0..seed_range`
    pub seed_range: u32,
    /// New player IDs are drawn from `0..max_player_id`
    pub max_player_id: u32,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            exhaustive_threshold: 8,
            repeat_constant: 0.1,
            repeat_factor: 10.0,
            seed_range: 1000,
            max_player_id: 99_999_999,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub bye_credit: f64,
    pub win_base: f64,
    pub upset_divisor: f64,
    pub participation_bonus: f64,
    pub significant_figures: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            bye_credit: 0.5,
            win_base: 1.0,
            upset_divisor: 5.0,
            participation_bonus: 1.0,
            significant_figures: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub roster_file: &'static str,
    pub backup_file: &'static str,
    pub scoring_log_file: &'static str,
    pub rankings_file: &'static str,
    pub report_file: &'static str,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let data_dir = std::env::var("POOL_NIGHT_DATA_DIR").unwrap_or_else(|_| "data".to_string());

        Self {
            data_dir: PathBuf::from(data_dir),
            roster_file: "players.json",
            backup_file: "backup.json",
            scoring_log_file: "scoring_log.txt",
            rankings_file: "rankings.csv",
            report_file: "night.json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pairing: PairingSettings,
    pub scoring: ScoringSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            pairing: PairingSettings::default(),
            scoring: ScoringSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    /// Same policy, different data directory
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        let mut config = Self::new();
        config.storage.data_dir = data_dir.into();
        config
    }
}
