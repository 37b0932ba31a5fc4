pub mod formats;
pub mod store;

pub use formats::{rankings_csv, week_from_backup, NightReport, RosterFile, WeekSummary};
pub use store::NightStore;
