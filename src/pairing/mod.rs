pub mod bye;
pub mod context;
pub mod cost;
pub mod ordering;
pub mod random;
pub mod ranked;
pub mod rng;

pub use bye::select_bye;
pub use context::{RoundContext, RoundGenPlayer};
pub use cost::{matchup_cost, CostMatrix, INVALID_PAIRING};
pub use random::RandomRoundGenerator;
pub use ranked::RankedRoundGenerator;
pub use rng::{choose, RandomSource, SeededRng, SystemRng};

use crate::config::PairingSettings;
use crate::domain::{Round, Week};
use crate::errors::NightResult;

/// Produces one fully paired round from a snapshot taken at construction.
/// Generating does not touch the week it was built from.
pub trait RoundGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> NightResult<Round>;
}

/// Which generator builds the next round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Random,
    Ranked,
    /// Random for the first round of the night, ranked afterwards
    #[default]
    Auto,
}

impl Strategy {
    pub fn resolve(self, round_number: u32) -> Strategy {
        match self {
            Strategy::Auto if round_number <= 1 => Strategy::Random,
            Strategy::Auto => Strategy::Ranked,
            explicit => explicit,
        }
    }
}

/// Build the week's next round with the chosen strategy
pub fn generate_round<R: RandomSource>(
    week: &Week,
    strategy: Strategy,
    rng: &mut R,
    settings: &PairingSettings,
) -> NightResult<Round> {
    let context = RoundContext::from_week(week);

    match strategy.resolve(context.round_number()) {
        Strategy::Random => RandomRoundGenerator::new(context).generate(rng),
        _ => RankedRoundGenerator::new(context, settings.clone()).generate(rng),
    }
}
