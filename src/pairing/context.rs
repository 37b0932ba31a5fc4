use std::collections::HashMap;

use log::debug;
use ndarray::Array2;

use crate::domain::{PlayerId, PlayerRegistry, Round, Week};

/// What round generation needs to know about one active player.
///
/// `slot` is the player's dense index for this generation pass;
/// `played_against` is indexed by the opponent's slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundGenPlayer {
    pub id: PlayerId,
    pub slot: usize,
    pub played_against: Vec<u32>,
    pub win_loss: f64,
    pub games_since_bye: u32,
    pub seed: u32,
}

/// Snapshot of a week taken when a generator is built. Results entered
/// afterwards are not seen.
#[derive(Debug, Clone)]
pub struct RoundContext {
    round_number: u32,
    players: Vec<RoundGenPlayer>,
    slots: HashMap<PlayerId, usize>,
}

impl RoundContext {
    pub fn from_week(week: &Week) -> Self {
        Self::new(&week.players, week.rounds(), week.next_round())
    }

    pub fn new(registry: &PlayerRegistry, rounds: &[Round], round_number: u32) -> Self {
        let active = registry.active_players();
        let n_players = active.len();

        // 1. Map active players to dense slots
        let slots: HashMap<PlayerId, usize> = active
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id(), slot))
            .collect();

        // 2. Tally meetings and results over every game this week
        let (meetings, wins, decided) = tally_history(rounds, &slots, n_players);

        // 3. Build the per-player view
        let players = active
            .iter()
            .enumerate()
            .map(|(slot, p)| RoundGenPlayer {
                id: p.id(),
                slot,
                played_against: normalise_meetings(&meetings, slot),
                win_loss: win_loss_proportion(wins[slot], decided[slot]),
                games_since_bye: p.games_since_bye,
                seed: p.seed,
            })
            .collect();

        debug!("Round {} context built for {} active players", round_number, n_players);

        Self {
            round_number,
            players,
            slots,
        }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn players(&self) -> &[RoundGenPlayer] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn slot_of(&self, id: PlayerId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub fn id_at(&self, slot: usize) -> PlayerId {
        self.players[slot].id
    }

    /// Ordering seed of an active player, 0 for anyone else
    pub fn seed_of(&self, id: PlayerId) -> u32 {
        self.slot_of(id).map_or(0, |slot| self.players[slot].seed)
    }
}

fn tally_history(
    rounds: &[Round],
    slots: &HashMap<PlayerId, usize>,
    n_players: usize,
) -> (Array2<u32>, Vec<u32>, Vec<u32>) {
    let mut meetings = Array2::<u32>::zeros((n_players, n_players));
    let mut wins = vec![0u32; n_players];
    let mut decided = vec![0u32; n_players];

    for game in rounds.iter().flat_map(|r| r.games()) {
        let [first, second] = game.players();
        if let (Some(&i), Some(&j)) = (slots.get(&first), slots.get(&second)) {
            meetings[[i, j]] += 1;
            meetings[[j, i]] += 1;
        }

        // Opponents who are not active tonight still count towards the record
        if let Some((winner, loser)) = game.result() {
            if let Some(&w) = slots.get(&winner) {
                wins[w] += 1;
                decided[w] += 1;
            }
            if let Some(&l) = slots.get(&loser) {
                decided[l] += 1;
            }
        }
    }

    (meetings, wins, decided)
}

/// One row of the meeting counts. Once a player has met every other active
/// player, the smallest count is taken off all of them.
fn normalise_meetings(meetings: &Array2<u32>, slot: usize) -> Vec<u32> {
    let row = meetings.row(slot);
    let minimum = row
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != slot)
        .map(|(_, count)| *count)
        .min()
        .unwrap_or(0);

    row.iter().map(|count| count.saturating_sub(minimum)).collect()
}

fn win_loss_proportion(wins: u32, decided: u32) -> f64 {
    if decided == 0 {
        0.5
    } else {
        wins as f64 / decided as f64
    }
}
