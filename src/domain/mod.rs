pub mod game;
pub mod player;
pub mod registry;
pub mod round;
pub mod week;

#[cfg(test)]
pub(crate) mod fixtures;

pub use game::{Game, Side};
pub use player::{Baseline, ByeStatus, MembershipType, Player, PlayerRecord, PlayingState};
pub use registry::PlayerRegistry;
pub use round::Round;
pub use week::Week;

/// Club-wide player identifier, unique within a registry
pub type PlayerId = u32;
