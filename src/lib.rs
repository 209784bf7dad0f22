//! Bataille (War) card game simulator for any number of players and any deck shape.

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod state;
pub mod visualize;

pub use crate::card::Card;
pub use crate::deck::Deck;
pub use crate::error::{GameError, PlayerError};
pub use crate::game::{DEFAULT_SEED, Game, GameBuilder, GameConfig};
pub use crate::player::{Player, Score};
pub use crate::state::{GameResult, GameSettings, GameStatus, PlayerId, PlayerSummary, RoundReport};
pub use crate::visualize::{
    VisualOptions, describe_result, describe_round, render_standings, render_standings_with_options,
};
