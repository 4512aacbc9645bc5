//! Draw deck and discard pile.
//!
//! Both piles are ordered stacks whose top is the last element. When the
//! deck runs out, everything under the top discard is shuffled into a new
//! deck and any wild-family card in it drops its chosen color.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::{shuffle, Card};
use crate::core::config::ShortfallPolicy;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// Cards dealt by a single draw request. Penalties rarely exceed four.
pub type Dealt = SmallVec<[Card; 4]>;

/// The shared draw deck and discard pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    /// Face-down draw deck (top = back).
    pub deck: Vector<Card>,
    /// Face-up discard pile (top = back).
    pub discard: Vector<Card>,
}

impl Piles {
    /// Create piles from a prepared deck and an empty discard pile.
    #[must_use]
    pub fn new(deck: impl IntoIterator<Item = Card>) -> Self {
        Self {
            deck: deck.into_iter().collect(),
            discard: Vector::new(),
        }
    }

    /// Cards left in the draw deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Top of the discard pile: the reference card for legality.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.discard.back()
    }

    /// Cards a sequence of draws could still obtain, counting everything
    /// under the top discard as recyclable.
    #[must_use]
    pub fn available(&self) -> usize {
        self.deck.len() + self.discard.len().saturating_sub(1)
    }

    /// Put a played card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard.push_back(card);
    }

    /// Slide a card under the draw deck.
    pub fn tuck(&mut self, card: Card) {
        self.deck.push_front(card);
    }

    /// Refill an empty deck from the discard pile.
    ///
    /// Keeps the top discard in place. Does nothing if the deck still has
    /// cards or the discard pile holds nothing recyclable. Returns whether
    /// a reshuffle happened.
    pub fn ensure_deck_not_empty(&mut self, rng: &mut GameRng) -> bool {
        if !self.deck.is_empty() || self.discard.len() <= 1 {
            return false;
        }

        let Some(top) = self.discard.pop_back() else {
            return false;
        };

        let mut recycled: Vec<Card> = std::mem::take(&mut self.discard).into_iter().collect();
        for card in &mut recycled {
            card.clear_wild_color();
        }
        shuffle(&mut recycled, rng);

        debug!(recycled = recycled.len(), top = %top, "Reshuffled discard pile into deck");

        self.deck = recycled.into_iter().collect();
        self.discard.push_back(top);
        true
    }

    /// Draw one card, recycling the discard pile first if needed.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        self.ensure_deck_not_empty(rng);
        self.deck.pop_back()
    }

    /// Draw `count` cards, refilling the deck before each one.
    ///
    /// Under `ShortfallPolicy::Reject` the request fails up front, before
    /// any card moves, if the piles cannot cover it. Under `Lenient` it
    /// deals what it can.
    pub fn deal(
        &mut self,
        count: usize,
        policy: ShortfallPolicy,
        rng: &mut GameRng,
    ) -> Result<Dealt, EngineError> {
        let available = self.available();
        if available < count {
            match policy {
                ShortfallPolicy::Reject => {
                    return Err(EngineError::InsufficientCards {
                        requested: count,
                        available,
                    });
                }
                ShortfallPolicy::Lenient => {
                    warn!(requested = count, available, "Piles exhausted, dealing short");
                }
            }
        }

        let mut dealt = Dealt::new();
        for _ in 0..count {
            match self.draw(rng) {
                Some(card) => dealt.push(card),
                None => break,
            }
        }
        Ok(dealt)
    }

    /// Every card currently in either pile.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.deck.iter().chain(self.discard.iter())
    }
}
