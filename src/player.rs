use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::PlayerError;

/// Comparable result of a player's plays within one round.
///
/// Ordering is lexicographic: a player who escalated further through
/// batailles always outranks one who played fewer cards, and equal play
/// counts are decided by the rank of the latest card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Score {
    pub play_count: u32,
    pub rank: u32,
}

/// A Bataille player: a draw stack plus the state of the current round.
///
/// `score` is `None` until the player plays a card in the round, and again
/// after [`Player::clear`]. `None` orders below every played score.
#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    hand: VecDeque<Card>,
    played_cards: Vec<Card>,
    score: Option<Score>,
}

impl Player {
    pub fn new(name: impl Into<String>, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            name: name.into(),
            hand: cards.into_iter().collect(),
            played_cards: Vec::new(),
            score: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &VecDeque<Card> {
        &self.hand
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn played_cards(&self) -> &[Card] {
        &self.played_cards
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    #[inline]
    pub fn has_card(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Plays the front card face up and raises the score.
    pub fn play_card(&mut self) -> Result<Card, PlayerError> {
        let card = self.draw()?;
        let play_count = self.score.map_or(0, |score| score.play_count);
        self.score = Some(Score {
            play_count: play_count + 1,
            rank: card.rank(),
        });
        Ok(card)
    }

    /// Burns the front card face down; the score is left untouched.
    pub fn discard_card(&mut self) -> Result<Card, PlayerError> {
        self.draw()
    }

    pub fn clear(&mut self) {
        self.played_cards.clear();
        self.score = None;
    }

    /// Appends won cards to the bottom of the hand.
    pub fn collect_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Moves this round's played cards out, leaving the score in place.
    pub fn take_played_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.played_cards)
    }

    fn draw(&mut self) -> Result<Card, PlayerError> {
        let card = self.hand.pop_front().ok_or_else(|| PlayerError::EmptyHand {
            player: self.name.clone(),
        })?;
        self.played_cards.push(card);
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(ranks: &[u32]) -> Vec<Card> {
        ranks.iter().copied().map(Card::new).collect()
    }

    #[test]
    fn play_card_escalates_score() -> Result<(), PlayerError> {
        let mut player = Player::new("Player 0", cards(&[4, 9, 2]));
        assert_eq!(player.score(), None);
        assert_eq!(player.play_card()?, Card(4));
        assert_eq!(player.score(), Some(Score { play_count: 1, rank: 4 }));
        player.discard_card()?;
        assert_eq!(player.score(), Some(Score { play_count: 1, rank: 4 }));
        player.play_card()?;
        assert_eq!(player.score(), Some(Score { play_count: 2, rank: 2 }));
        assert_eq!(player.played_cards(), cards(&[4, 9, 2]).as_slice());
        assert!(!player.has_card());
        Ok(())
    }

    #[test]
    fn empty_hand_is_a_precondition_violation() {
        let mut player = Player::new("Player 3", Vec::new());
        assert_eq!(
            player.play_card(),
            Err(PlayerError::EmptyHand {
                player: String::from("Player 3")
            })
        );
        assert!(player.discard_card().is_err());
        assert!(player.played_cards().is_empty());
    }

    #[test]
    fn clear_resets_round_state_but_keeps_hand() -> Result<(), PlayerError> {
        let mut player = Player::new("p", cards(&[1, 2]));
        player.play_card()?;
        player.clear();
        assert_eq!(player.score(), None);
        assert!(player.played_cards().is_empty());
        assert_eq!(player.hand_size(), 1);
        Ok(())
    }

    #[test]
    fn collected_cards_go_to_the_bottom() -> Result<(), PlayerError> {
        let mut player = Player::new("p", cards(&[1]));
        player.collect_cards(cards(&[7, 8]));
        assert_eq!(player.play_card()?, Card(1));
        assert_eq!(player.hand().iter().copied().collect::<Vec<_>>(), cards(&[7, 8]));
        Ok(())
    }

    #[test]
    fn more_plays_outrank_higher_cards() {
        let escalated = Some(Score { play_count: 2, rank: 0 });
        let single = Some(Score { play_count: 1, rank: 13 });
        assert!(escalated > single);
        assert!(single > None);
    }

    #[test]
    fn take_played_cards_keeps_score() -> Result<(), PlayerError> {
        let mut player = Player::new("p", cards(&[5]));
        player.play_card()?;
        assert_eq!(player.take_played_cards(), cards(&[5]));
        assert!(player.played_cards().is_empty());
        assert_eq!(player.score(), Some(Score { play_count: 1, rank: 5 }));
        Ok(())
    }
}
