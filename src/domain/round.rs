use serde::{Deserialize, Serialize};

use super::game::Game;
use super::PlayerId;

/// One set of simultaneous games, plus the player sitting it out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    number: u32,
    games: Vec<Game>,
    bye: Option<PlayerId>,
}

impl Round {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            games: Vec::new(),
            bye: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn bye(&self) -> Option<PlayerId> {
        self.bye
    }

    pub fn set_bye(&mut self, bye: Option<PlayerId>) {
        self.bye = bye;
    }

    /// Replace the games with a reordering of them
    pub(crate) fn reorder_games<F>(&mut self, reorder: F)
    where
        F: FnOnce(Vec<Game>) -> Vec<Game>,
    {
        let games = std::mem::take(&mut self.games);
        self.games = reorder(games);
    }

    pub fn add_game(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Append a game numbered after the games already in the round
    pub fn create_game(&mut self, players: [PlayerId; 2]) -> &Game {
        let number = self.games.len() as u32 + 1;
        self.games.push(Game::new(players, self.number, number));
        &self.games[self.games.len() - 1]
    }

    pub fn highest_game_number(&self) -> u32 {
        self.games.iter().map(Game::number).max().unwrap_or(0)
    }

    pub fn game(&self, number: u32) -> Option<&Game> {
        self.games.iter().find(|g| g.number() == number)
    }

    pub fn game_mut(&mut self, number: u32) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.number() == number)
    }

    /// Everyone placed in this round: both sides of every game, then the bye
    pub fn participants(&self) -> Vec<PlayerId> {
        self.games
            .iter()
            .flat_map(|g| g.players())
            .chain(self.bye)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.games.iter().all(Game::is_finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_game_numbers_sequentially() {
        let mut round = Round::new(2);
        round.create_game([1, 2]);
        let game = round.create_game([3, 4]);

        assert_eq!(game.number(), 2);
        assert_eq!(game.round(), 2);
        assert_eq!(round.highest_game_number(), 2);
    }

    #[test]
    fn test_participants_include_bye() {
        let mut round = Round::new(1);
        round.create_game([1, 2]);
        round.set_bye(Some(3));

        assert_eq!(round.participants(), vec![1, 2, 3]);
    }
}
