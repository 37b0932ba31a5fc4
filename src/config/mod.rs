pub mod settings;

pub use settings::{AppConfig, PairingSettings, ScoringSettings, StorageSettings};
