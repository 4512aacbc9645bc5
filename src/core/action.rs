//! Action representation.
//!
//! Four actions exist, each submitted on behalf of one player:
//! - `PlayCard` = a card identifier plus, for wild-family cards, a color
//! - `DrawCard`, `PassTurn`, `DeclareLowHand` = no arguments

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{CardId, Color};

/// A player action.
///
/// ## Example
///
/// ```
/// use uno_engine::core::Action;
/// use uno_engine::cards::{CardId, Color};
///
/// let play = Action::play(CardId::new(5));
/// let wild = Action::play_wild(CardId::new(100), Color::Green);
/// assert_ne!(play, wild);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    PlayCard {
        card: CardId,
        chosen_color: Option<Color>,
    },
    DrawCard,
    PassTurn,
    DeclareLowHand,
}

impl Action {
    /// Play a colored card.
    #[must_use]
    pub const fn play(card: CardId) -> Self {
        Action::PlayCard {
            card,
            chosen_color: None,
        }
    }

    /// Play a wild-family card, naming the color it resolves to.
    #[must_use]
    pub const fn play_wild(card: CardId, color: Color) -> Self {
        Action::PlayCard {
            card,
            chosen_color: Some(color),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "play_card",
            Action::DrawCard => "draw_card",
            Action::PassTurn => "pass_turn",
            Action::DeclareLowHand => "declare_low_hand",
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Deterministic replay on another replica
/// - Auditing and debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
