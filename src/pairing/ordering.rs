use crate::domain::{Game, PlayerId};

/// Order games by the sum of both players' weekly seeds, keeping the
/// generated order between equal sums, then renumber them from 1.
pub fn order_games<F>(mut games: Vec<Game>, seed_of: F) -> Vec<Game>
where
    F: Fn(PlayerId) -> u32,
{
    games.sort_by_key(|game| {
        game.players()
            .iter()
            .map(|id| u64::from(seed_of(*id)))
            .sum::<u64>()
    });

    for (position, game) in games.iter_mut().enumerate() {
        game.renumber(position as u32 + 1);
    }

    games
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_sorted_by_seed_sum_and_renumbered() {
        let games = vec![
            Game::new([1, 2], 1, 1),
            Game::new([3, 4], 1, 2),
            Game::new([5, 6], 1, 3),
        ];
        let seeds = |id: PlayerId| [0, 50, 50, 1, 2, 10, 10][id as usize];

        let ordered = order_games(games, seeds);
        let pairs: Vec<[PlayerId; 2]> = ordered.iter().map(Game::players).collect();
        let numbers: Vec<u32> = ordered.iter().map(Game::number).collect();

        assert_eq!(pairs, vec![[3, 4], [5, 6], [1, 2]]);
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_sums_keep_generated_order() {
        let games = vec![
            Game::new([1, 2], 1, 1),
            Game::new([3, 4], 1, 2),
            Game::new([5, 6], 1, 3),
        ];

        let ordered = order_games(games, |_| 7);
        let pairs: Vec<[PlayerId; 2]> = ordered.iter().map(Game::players).collect();

        assert_eq!(pairs, vec![[1, 2], [3, 4], [5, 6]]);
    }
}
