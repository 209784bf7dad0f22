use std::fmt;

use serde::{Deserialize, Serialize};

/// A Bataille card, identified by its rank only.
///
/// Regular ranks lie in `0..cards_per_suit`; the joker uses the rank
/// `cards_per_suit` so it beats every regular card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Card(pub u32);

pub const DEFAULT_CARDS_PER_SUIT: u32 = 13;
pub const DEFAULT_SUIT_COUNT: u32 = 4;
pub const DEFAULT_JOKER_COUNT: u32 = 2;

impl Card {
    #[inline]
    pub fn new(rank: u32) -> Self {
        Card(rank)
    }

    /// Joker card for a deck with `cards_per_suit` regular ranks.
    #[inline]
    pub fn joker(cards_per_suit: u32) -> Self {
        Card(cards_per_suit)
    }

    #[inline]
    pub fn rank(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_joker(&self, cards_per_suit: u32) -> bool {
        self.0 == cards_per_suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the unshuffled card multiset: every regular rank once per suit,
/// followed by the jokers.
pub fn full_deck(cards_per_suit: u32, suit_count: u32, joker_count: u32) -> Vec<Card> {
    let size = (cards_per_suit as usize) * (suit_count as usize) + joker_count as usize;
    let mut deck = Vec::with_capacity(size);
    for _ in 0..suit_count {
        deck.extend((0..cards_per_suit).map(Card::new));
    }
    deck.extend(std::iter::repeat(Card::joker(cards_per_suit)).take(joker_count as usize));
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_has_suits_then_jokers() {
        let deck = full_deck(3, 2, 2);
        let ranks: Vec<u32> = deck.iter().map(Card::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 0, 1, 2, 3, 3]);
    }

    #[test]
    fn joker_outranks_every_regular_card() {
        let joker = Card::joker(DEFAULT_CARDS_PER_SUIT);
        assert!(joker.is_joker(DEFAULT_CARDS_PER_SUIT));
        assert!((0..DEFAULT_CARDS_PER_SUIT).all(|rank| Card::new(rank) < joker));
    }

    #[test]
    fn zero_suits_leaves_only_jokers() {
        let deck = full_deck(5, 0, 3);
        assert_eq!(deck, vec![Card(5); 3]);
    }
}
