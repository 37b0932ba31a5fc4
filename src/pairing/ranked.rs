use log::debug;

use super::bye::select_bye;
use super::context::RoundContext;
use super::cost::{CostMatrix, INVALID_PAIRING};
use super::ordering::order_games;
use super::rng::{choose, RandomSource};
use super::RoundGenerator;
use crate::config::PairingSettings;
use crate::domain::{Round, Week};
use crate::errors::{NightError, NightResult};

/// Pairs players with similar records who have not met yet.
///
/// Large pools are cut down greedily, one cheapest pairing at a time, until
/// `exhaustive_threshold` players remain; every full pairing of those is
/// then tried and the cheapest kept.
#[derive(Debug, Clone)]
pub struct RankedRoundGenerator {
    context: RoundContext,
    settings: PairingSettings,
}

/// A complete pairing of matrix positions and its summed cost
type Pairing = (f64, Vec<(usize, usize)>);

impl RankedRoundGenerator {
    pub fn new(context: RoundContext, settings: PairingSettings) -> Self {
        Self { context, settings }
    }

    pub fn from_week(week: &Week, settings: &PairingSettings) -> Self {
        Self::new(RoundContext::from_week(week), settings.clone())
    }

    /// Take the cheapest pairing (random among ties) until the pool is
    /// small enough to enumerate
    fn greedy_phase<R: RandomSource>(
        &self,
        remaining: &mut Vec<usize>,
        round: &mut Round,
        rng: &mut R,
    ) -> NightResult<()> {
        while remaining.len() > self.settings.exhaustive_threshold {
            let matrix = CostMatrix::build(&self.context, remaining.as_slice(), &self.settings);
            let candidates = matrix.minimum_pairings();
            let &(i, j) = choose(rng, &candidates, "greedy pairing")?;

            let (a, b) = (matrix.slot(i), matrix.slot(j));
            debug!(
                "Greedy pick {} vs {} at cost {:.3} ({} tied)",
                self.context.id_at(a),
                self.context.id_at(b),
                matrix.cost(i, j),
                candidates.len()
            );

            round.create_game([self.context.id_at(a), self.context.id_at(b)]);
            remaining.retain(|slot| *slot != a && *slot != b);
        }
        Ok(())
    }

    fn exhaustive_phase(&self, remaining: &[usize], round: &mut Round) -> NightResult<()> {
        let matrix = CostMatrix::build(&self.context, remaining, &self.settings);
        let (total, pairs) = best_pairing(&matrix)?;
        debug!("Exhaustive pairing of {} players costs {:.3}", remaining.len(), total);

        for (i, j) in pairs {
            round.create_game([
                self.context.id_at(matrix.slot(i)),
                self.context.id_at(matrix.slot(j)),
            ]);
        }
        Ok(())
    }
}

impl RoundGenerator for RankedRoundGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> NightResult<Round> {
        let context = &self.context;
        let mut round = Round::new(context.round_number());
        let mut remaining: Vec<usize> = (0..context.len()).collect();

        // 1. Bye for an odd pool
        if remaining.len() % 2 == 1 {
            let bye = select_bye(context.players(), rng)?;
            round.set_bye(Some(bye));
            remaining.retain(|slot| context.id_at(*slot) != bye);
        }

        // 2. Greedy cut-down
        self.greedy_phase(&mut remaining, &mut round, rng)?;

        // 3. Enumerate the rest
        self.exhaustive_phase(&remaining, &mut round)?;

        // 4. Seed order
        round.reorder_games(|games| order_games(games, |id| context.seed_of(id)));
        Ok(round)
    }
}

/// Cheapest way to split every matrix position into pairs. The first
/// pairing found wins a tie.
pub fn best_pairing(matrix: &CostMatrix) -> NightResult<Pairing> {
    let positions: Vec<usize> = (0..matrix.size()).collect();
    if positions.len() % 2 == 1 {
        return Err(NightError::RoundGenerationFailed(format!(
            "{} players cannot be split into pairs",
            positions.len()
        )));
    }

    search(matrix, &positions).ok_or_else(|| {
        NightError::RoundGenerationFailed("no valid pairing of the remaining players".to_string())
    })
}

fn search(matrix: &CostMatrix, remaining: &[usize]) -> Option<Pairing> {
    let Some((&first, rest)) = remaining.split_first() else {
        return Some((0.0, Vec::new()));
    };

    let mut best: Option<Pairing> = None;
    for (k, &partner) in rest.iter().enumerate() {
        let cost = matrix.cost(first, partner);
        if cost == INVALID_PAIRING {
            continue;
        }

        let others: Vec<usize> = rest
            .iter()
            .enumerate()
            .filter(|(m, _)| *m != k)
            .map(|(_, position)| *position)
            .collect();

        if let Some((sub_total, mut pairs)) = search(matrix, &others) {
            let total = cost + sub_total;
            if best.as_ref().is_none_or(|(current, _)| total < *current) {
                pairs.insert(0, (first, partner));
                best = Some((total, pairs));
            }
        }
    }
    best
}
