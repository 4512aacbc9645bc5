//! Game configuration.
//!
//! Hosts configure table rules at startup with `GameConfig`. The defaults
//! are the standard rules: seven-card hands, one to six players, a two-card
//! catch-penalty, and a hard fault when the piles run dry.

use serde::{Deserialize, Serialize};

use super::error::SetupError;
use crate::cards::Color;

/// Absolute seat limit supported by the engine.
pub const MAX_SEATS: usize = 6;

/// What to do when a required draw finds both piles exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortfallPolicy {
    /// Reject the whole action with `EngineError::InsufficientCards`.
    #[default]
    Reject,
    /// Deal whatever is available and carry on.
    Lenient,
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt at setup and to a fresh joiner.
    pub hand_size: usize,

    /// Fewest players setup accepts.
    pub min_players: usize,

    /// Most players that may be seated at once.
    pub max_players: usize,

    /// Cards drawn for reaching one card without a declaration.
    pub catch_penalty: usize,

    /// Largest hand at which a low-hand declaration is accepted.
    pub low_hand_limit: usize,

    /// Active color when the start card is a wild.
    pub fallback_color: Color,

    /// Behavior when the deck and discard pile cannot cover a draw.
    pub shortfall: ShortfallPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 7,
            min_players: 1,
            max_players: MAX_SEATS,
            catch_penalty: 2,
            low_hand_limit: 2,
            fallback_color: Color::Red,
            shortfall: ShortfallPolicy::Reject,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the accepted player count range.
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the catch-penalty size.
    #[must_use]
    pub fn with_catch_penalty(mut self, cards: usize) -> Self {
        self.catch_penalty = cards;
        self
    }

    /// Set the fallback color for a wild start card.
    #[must_use]
    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.fallback_color = color;
        self
    }

    /// Set the shortfall policy.
    #[must_use]
    pub fn with_shortfall(mut self, policy: ShortfallPolicy) -> Self {
        self.shortfall = policy;
        self
    }

    /// Check that the configuration describes a playable table.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.hand_size == 0 {
            return Err(SetupError::InvalidConfig("hand size must be at least 1".into()));
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(SetupError::InvalidConfig(format!(
                "invalid player range {}..={}",
                self.min_players, self.max_players
            )));
        }
        if self.max_players > MAX_SEATS {
            return Err(SetupError::InvalidConfig(format!(
                "at most {MAX_SEATS} players supported"
            )));
        }
        // Deal plus the start card must fit in the deck.
        if self.max_players * self.hand_size >= crate::cards::DECK_SIZE {
            return Err(SetupError::InvalidConfig(format!(
                "{} hands of {} cards exceed the deck",
                self.max_players, self.hand_size
            )));
        }
        Ok(())
    }
}
