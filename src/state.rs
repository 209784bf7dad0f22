use serde::{Deserialize, Serialize};

use crate::card::{DEFAULT_CARDS_PER_SUIT, DEFAULT_JOKER_COUNT, DEFAULT_SUIT_COUNT};
use crate::error::GameError;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Deck shape and seat count of a game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub player_count: usize,
    pub cards_per_suit: u32,
    pub suit_count: u32,
    pub joker_count: u32,
}

impl GameSettings {
    /// Classic deck (13 ranks, 4 suits, 2 jokers) for `player_count` seats.
    pub fn new(player_count: usize) -> Result<Self, GameError> {
        Self::with_deck_shape(
            player_count,
            DEFAULT_CARDS_PER_SUIT,
            DEFAULT_SUIT_COUNT,
            DEFAULT_JOKER_COUNT,
        )
    }

    pub fn with_deck_shape(
        player_count: usize,
        cards_per_suit: u32,
        suit_count: u32,
        joker_count: u32,
    ) -> Result<Self, GameError> {
        let settings = Self {
            player_count,
            cards_per_suit,
            suit_count,
            joker_count,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_count == 0 {
            return Err(GameError::InvalidConfiguration(
                "player count must be positive",
            ));
        }
        if self.cards_per_suit == 0 {
            return Err(GameError::InvalidConfiguration(
                "cards per suit must be positive",
            ));
        }
        Ok(())
    }

    pub fn deck_size(&self) -> usize {
        self.cards_per_suit as usize * self.suit_count as usize + self.joker_count as usize
    }

    /// Rank carried by jokers; also the highest legal rank.
    pub fn joker_rank(&self) -> u32 {
        self.cards_per_suit
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
    /// Every remaining contender ran out of cards in the same bataille.
    NoWinner,
    /// The configured round limit was reached with several players left.
    Aborted,
}

/// Outcome of a finished game, as reported to callers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Option<PlayerId>,
    pub winner_name: Option<String>,
    pub round_count: usize,
    pub status: GameStatus,
}

/// What happened during a single round.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundReport {
    pub round: usize,
    /// Player who collected the pile, if any.
    pub winner: Option<PlayerId>,
    pub pile_size: usize,
    /// Number of tie-resolution passes (batailles) played.
    pub batailles: usize,
    /// Players knocked out of the round because they ran out of cards mid-bataille.
    pub cleared: Vec<PlayerId>,
    /// Players holding no card at the end of the round.
    pub eliminated: Vec<PlayerId>,
}

/// Public view of a seat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_settings() -> Result<(), GameError> {
        let settings = GameSettings::new(4)?;
        assert_eq!(settings.deck_size(), 54);
        assert_eq!(settings.joker_rank(), 13);
        Ok(())
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(GameSettings::new(0).is_err());
        assert!(GameSettings::with_deck_shape(2, 0, 4, 0).is_err());
        assert!(GameSettings::with_deck_shape(1, 1, 0, 0).is_ok());
    }
}
