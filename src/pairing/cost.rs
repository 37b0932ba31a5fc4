use ndarray::Array2;

use super::context::{RoundContext, RoundGenPlayer};
use crate::config::PairingSettings;

/// Cost of pairing a player with themself
pub const INVALID_PAIRING: f64 = -1.0;

/// Penalty for pairing `a` with `b`: the gap between their win/loss
/// proportions, boosted when they have already met this week.
pub fn matchup_cost(a: &RoundGenPlayer, b: &RoundGenPlayer, settings: &PairingSettings) -> f64 {
    if a.id == b.id {
        return INVALID_PAIRING;
    }

    let difference = (a.win_loss - b.win_loss).abs();
    if have_met(a, b) {
        (difference + settings.repeat_constant) * settings.repeat_factor
    } else {
        difference
    }
}

fn have_met(a: &RoundGenPlayer, b: &RoundGenPlayer) -> bool {
    let count = |player: &RoundGenPlayer, other: usize| player.played_against.get(other).copied().unwrap_or(0);
    count(a, b.slot) > 0 || count(b, a.slot) > 0
}

/// Pairwise costs over a subset of the context's players. Rows and columns
/// are positions in that subset.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    slots: Vec<usize>,
    costs: Array2<f64>,
}

impl CostMatrix {
    pub fn build(context: &RoundContext, slots: &[usize], settings: &PairingSettings) -> Self {
        let players = context.players();
        let costs = Array2::from_shape_fn((slots.len(), slots.len()), |(i, j)| {
            matchup_cost(&players[slots[i]], &players[slots[j]], settings)
        });

        Self {
            slots: slots.to_vec(),
            costs,
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn cost(&self, i: usize, j: usize) -> f64 {
        self.costs[[i, j]]
    }

    /// Context slot of the player at position `i`
    pub fn slot(&self, i: usize) -> usize {
        self.slots[i]
    }

    /// Every pairing `(i, j)` with `i < j` tied at the lowest valid cost
    pub fn minimum_pairings(&self) -> Vec<(usize, usize)> {
        let minimum = self
            .valid_pairings()
            .map(|(i, j)| self.cost(i, j))
            .fold(f64::INFINITY, f64::min);

        self.valid_pairings()
            .filter(|&(i, j)| self.cost(i, j) == minimum)
            .collect()
    }

    fn valid_pairings(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.cost(i, j) != INVALID_PAIRING)
    }
}
