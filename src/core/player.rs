//! Player identification and per-player data.
//!
//! ## PlayerId
//!
//! Stable identifier handed to the engine by the hosting platform. Unlike a
//! seat index it survives players leaving and rejoining.
//!
//! ## Player
//!
//! A seat in the turn order: identifier, private hand, and the low-hand
//! declaration flag.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Platform-assigned player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A participant in the turn order.
///
/// Hand order is preserved for display but carries no rules meaning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub hand: Vector<Card>,
    /// Set by a low-hand declaration; protects the one play that brings
    /// the hand down to a single card.
    pub declared_low_hand: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self::with_hand(id, Vector::new())
    }

    /// Create a player holding the given cards.
    #[must_use]
    pub fn with_hand(id: PlayerId, hand: Vector<Card>) -> Self {
        Self {
            id,
            hand,
            declared_low_hand: false,
        }
    }

    /// Number of cards in hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Find a card in hand by identifier.
    #[must_use]
    pub fn find_card(&self, card_id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Remove a card from hand by identifier.
    ///
    /// Returns the card if it was held.
    pub fn take_card(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == card_id)?;
        Some(self.hand.remove(pos))
    }

    /// Does the hand contain a card that can extend a draw stack?
    #[must_use]
    pub fn holds_draw_card(&self) -> bool {
        self.hand.iter().any(Card::is_draw)
    }
}
