use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, full_deck};
use crate::error::GameError;

/// Configurable deck that is shuffled and dealt once per game.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards_per_suit: u32, suit_count: u32, joker_count: u32) -> Result<Self, GameError> {
        if cards_per_suit == 0 {
            return Err(GameError::InvalidConfiguration(
                "cards per suit must be positive",
            ));
        }
        Ok(Self {
            cards: full_deck(cards_per_suit, suit_count, joker_count),
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffles the deck and deals it round robin into `stacks` piles.
    ///
    /// Stack `i` receives the shuffled cards at positions `i, i + n, i + 2n, ...`
    /// in that order. Stacks may be empty when there are more stacks than cards.
    pub fn distribute<R: Rng + ?Sized>(
        &mut self,
        stacks: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<Card>>, GameError> {
        if stacks == 0 {
            return Err(GameError::InvalidConfiguration(
                "cards must be dealt to at least one stack",
            ));
        }
        self.cards.shuffle(rng);
        let mut dealt = vec![Vec::with_capacity(self.cards.len() / stacks + 1); stacks];
        for (position, card) in self.cards.iter().enumerate() {
            dealt[position % stacks].push(*card);
        }
        Ok(dealt)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn sorted_ranks(cards: impl IntoIterator<Item = Card>) -> Vec<u32> {
        let mut ranks: Vec<u32> = cards.into_iter().map(|card| card.rank()).collect();
        ranks.sort_unstable();
        ranks
    }

    #[test]
    fn classic_deck_has_54_cards() -> Result<(), GameError> {
        let deck = Deck::new(13, 4, 2)?;
        assert_eq!(deck.len(), 54);
        assert_eq!(deck.cards().iter().filter(|c| c.is_joker(13)).count(), 2);
        Ok(())
    }

    #[test]
    fn rejects_zero_cards_per_suit() {
        assert!(matches!(
            Deck::new(0, 4, 2),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_zero_stacks() -> Result<(), GameError> {
        let mut deck = Deck::new(4, 1, 0)?;
        let mut rng = StdRng::seed_from_u64(1);
        assert!(deck.distribute(0, &mut rng).is_err());
        Ok(())
    }

    #[test]
    fn distribute_deals_round_robin_from_shuffled_order() -> Result<(), GameError> {
        let mut deck = Deck::new(13, 4, 2)?;
        let mut rng = StdRng::seed_from_u64(7);
        let stacks = deck.distribute(4, &mut rng)?;
        let shuffled = deck.cards();
        for (index, stack) in stacks.iter().enumerate() {
            let expected: Vec<Card> = shuffled.iter().skip(index).step_by(4).copied().collect();
            assert_eq!(stack, &expected);
        }
        // 54 cards over 4 stacks: the first two get the extra card.
        let sizes: Vec<usize> = stacks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![14, 14, 13, 13]);
        Ok(())
    }

    #[test]
    fn distribute_preserves_the_multiset() -> Result<(), GameError> {
        let mut deck = Deck::new(6, 3, 1)?;
        let original = sorted_ranks(deck.cards().iter().copied());
        let mut rng = StdRng::seed_from_u64(99);
        let stacks = deck.distribute(5, &mut rng)?;
        assert_eq!(sorted_ranks(stacks.into_iter().flatten()), original);
        Ok(())
    }

    #[test]
    fn distribute_is_deterministic_for_a_seed() -> Result<(), GameError> {
        let deal = |seed| -> Result<Vec<Vec<Card>>, GameError> {
            let mut deck = Deck::new(13, 4, 2)?;
            deck.distribute(3, &mut StdRng::seed_from_u64(seed))
        };
        assert_eq!(deal(42)?, deal(42)?);
        assert_ne!(deal(1)?, deal(2)?);
        Ok(())
    }

    #[test]
    fn more_stacks_than_cards_leaves_empty_stacks() -> Result<(), GameError> {
        let mut deck = Deck::new(2, 1, 0)?;
        let stacks = deck.distribute(5, &mut StdRng::seed_from_u64(3))?;
        assert_eq!(stacks.len(), 5);
        assert!(stacks[2..].iter().all(Vec::is_empty));
        Ok(())
    }
}
