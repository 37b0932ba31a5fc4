use super::player::{Player, PlayerRecord, PlayingState};
use super::registry::PlayerRegistry;
use super::week::Week;
use super::PlayerId;

/// Registry holding one player per `(id, name, rating)`, all not playing.
/// Seeds are the player's position so game order is predictable.
pub(crate) fn registry_with(players: &[(PlayerId, &str, f64)]) -> PlayerRegistry {
    let mut registry = PlayerRegistry::new();
    for (position, (id, name, rating)) in players.iter().enumerate() {
        let player = Player::from_record(PlayerRecord::new(*id, name, *rating), position as u32);
        registry
            .add_player(player)
            .expect("fixture player IDs are unique");
    }
    registry
}

/// Week where every listed player is playing
pub(crate) fn playing_week(players: &[(PlayerId, &str, f64)]) -> Week {
    let mut registry = registry_with(players);
    for (id, _, _) in players {
        registry
            .set_playing_state(*id, PlayingState::Playing)
            .expect("fixture player exists");
    }
    Week::new(registry)
}

/// Week of `count` equally rated playing players with IDs `1..=count`
pub(crate) fn even_week(count: u32) -> Week {
    let names: Vec<String> = (1..=count).map(|id| format!("Player {}", id)).collect();
    let players: Vec<(PlayerId, &str, f64)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (i as PlayerId + 1, name.as_str(), 0.0))
        .collect();
    playing_week(&players)
}
