pub mod night;

pub use night::{NewPlayer, NightService, RankingOutcome};
