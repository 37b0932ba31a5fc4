use log::debug;

use super::bye::select_bye;
use super::context::RoundContext;
use super::ordering::order_games;
use super::rng::RandomSource;
use super::RoundGenerator;
use crate::domain::{Round, Week};
use crate::errors::NightResult;

/// Pairs players in a random order. Used when nobody has a result yet.
#[derive(Debug, Clone)]
pub struct RandomRoundGenerator {
    context: RoundContext,
}

impl RandomRoundGenerator {
    pub fn new(context: RoundContext) -> Self {
        Self { context }
    }

    pub fn from_week(week: &Week) -> Self {
        Self::new(RoundContext::from_week(week))
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> NightResult<Round> {
        let context = &self.context;
        let mut round = Round::new(context.round_number());

        let mut slots: Vec<usize> = (0..context.len()).collect();
        rng.shuffle(&mut slots);

        if slots.len() % 2 == 1 {
            let bye = select_bye(context.players(), rng)?;
            round.set_bye(Some(bye));
            slots.retain(|slot| context.id_at(*slot) != bye);
        }

        for pair in slots.chunks_exact(2) {
            round.create_game([context.id_at(pair[0]), context.id_at(pair[1])]);
        }
        debug!("Randomly paired {} games", round.games().len());

        round.reorder_games(|games| order_games(games, |id| context.seed_of(id)));
        Ok(round)
    }
}
