use log::debug;

use super::context::RoundGenPlayer;
use super::rng::{choose, RandomSource};
use crate::domain::PlayerId;
use crate::errors::NightResult;

/// Pick who sits out: someone with the most games since their last bye,
/// ties broken at random.
pub fn select_bye<R: RandomSource>(players: &[RoundGenPlayer], rng: &mut R) -> NightResult<PlayerId> {
    let most = players.iter().map(|p| p.games_since_bye).max().unwrap_or(0);
    let candidates: Vec<PlayerId> = players
        .iter()
        .filter(|p| p.games_since_bye == most)
        .map(|p| p.id)
        .collect();

    let bye = *choose(rng, &candidates, "bye")?;
    debug!(
        "Bye goes to {} ({} games since last bye, {} candidates)",
        bye,
        most,
        candidates.len()
    );
    Ok(bye)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NightError;
    use crate::pairing::SeededRng;

    fn player(id: PlayerId, games_since_bye: u32) -> RoundGenPlayer {
        RoundGenPlayer {
            id,
            slot: 0,
            played_against: Vec::new(),
            win_loss: 0.5,
            games_since_bye,
            seed: 0,
        }
    }

    #[test]
    fn test_bye_goes_to_longest_run() {
        let players = vec![player(1, 2), player(2, 5), player(3, 4)];
        let mut rng = SeededRng::from_seed(9);

        for _ in 0..10 {
            assert_eq!(select_bye(&players, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_ties_only_pick_from_maximum() {
        let players = vec![player(1, 3), player(2, 1), player(3, 3)];
        let mut rng = SeededRng::from_seed(4);

        let picks: Vec<PlayerId> = (0..40).map(|_| select_bye(&players, &mut rng).unwrap()).collect();

        assert!(picks.iter().all(|id| *id == 1 || *id == 3));
        assert!(picks.contains(&1) && picks.contains(&3));
    }

    #[test]
    fn test_no_players_is_an_error() {
        let result = select_bye(&[], &mut SeededRng::from_seed(1));
        assert_eq!(result, Err(NightError::EmptyCandidates("bye")));
    }
}
