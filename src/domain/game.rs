use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Which of a game's two positions a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// One game between two players.
///
/// Players and round are fixed at creation. The game number only changes
/// while the generator orders a fresh round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    players: [PlayerId; 2],
    round: u32,
    number: u32,
    pub scores: [Option<u32>; 2],
    /// Currently being scored at the table
    #[serde(default)]
    pub is_playing: bool,
}

impl Game {
    pub fn new(players: [PlayerId; 2], round: u32, number: u32) -> Self {
        Self {
            players,
            round,
            number,
            scores: [None, None],
            is_playing: false,
        }
    }

    /// A game entered after the fact with its final score
    pub fn with_scores(players: [PlayerId; 2], round: u32, number: u32, scores: [u32; 2]) -> Self {
        Self {
            scores: [Some(scores[0]), Some(scores[1])],
            ..Self::new(players, round, number)
        }
    }

    pub fn players(&self) -> [PlayerId; 2] {
        self.players
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub(crate) fn renumber(&mut self, number: u32) {
        self.number = number;
    }

    pub fn set_score(&mut self, side: Side, score: Option<u32>) {
        self.scores[side.index()] = score;
    }

    pub fn set_scores(&mut self, first: u32, second: u32) {
        self.scores = [Some(first), Some(second)];
    }

    /// Both scores entered and different
    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }

    /// `(winner, loser)` for a decided game
    pub fn result(&self) -> Option<(PlayerId, PlayerId)> {
        match self.scores {
            [Some(first), Some(second)] if first > second => Some((self.players[0], self.players[1])),
            [Some(first), Some(second)] if second > first => Some((self.players[1], self.players[0])),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.result().map(|(winner, _)| winner)
    }

    pub fn loser(&self) -> Option<PlayerId> {
        self.result().map(|(_, loser)| loser)
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }

    pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        match self.players {
            [first, second] if first == id => Some(second),
            [first, second] if second == id => Some(first),
            _ => None,
        }
    }
}
