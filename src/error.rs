use thiserror::Error;

/// Errors that can occur when configuring or running a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("card rank {rank} exceeds the joker rank {max}")]
    InvalidCard { rank: u32, max: u32 },
    #[error("player rule violated: {0}")]
    Player(#[from] PlayerError),
    #[error("game is already over")]
    GameOver,
}

/// Precondition violations on a single player.
///
/// The round engine checks `has_card` before every draw, so these only
/// surface when the engine itself is broken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("player {player} cannot draw because their hand is empty")]
    EmptyHand { player: String },
}
