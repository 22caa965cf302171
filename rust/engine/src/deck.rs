use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// Seed used when a caller does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Remaining cards of a round plus the RNG that shuffles the next one.
///
/// The deck is a plain value: cloning it clones the RNG state too, so a
/// superseded game-state snapshot replays exactly the same future deals.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Full deck in construction order; call [`Deck::shuffle`] before dealing.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Restores all 52 cards and shuffles them.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, EngineError> {
        if self.cards.is_empty() {
            return Err(EngineError::DeckExhausted);
        }
        Ok(self.cards.remove(0))
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::DeckExhausted);
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Takes the given cards out of the deck wherever they sit.
    pub fn remove(&mut self, cards: &[Card]) {
        self.cards.retain(|c| !cards.contains(c));
    }

    /// Forces `cards` to be the next ones drawn, in order.
    pub fn stack(&mut self, cards: &[Card]) {
        self.remove(cards);
        self.cards.splice(0..0, cards.iter().copied());
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
