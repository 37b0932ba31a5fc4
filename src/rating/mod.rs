pub mod engine;
pub mod rounding;
pub mod snapshot;

pub use engine::{award_win, calculate_rankings, RankingMode, ScoringLog};
pub use rounding::round_to_significant;
pub use snapshot::{FrozenRatings, RunningTally, TallyEntry};
