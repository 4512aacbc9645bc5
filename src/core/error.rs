//! Engine error types.
//!
//! Every fault is scoped to the single rejected action or event: the engine
//! state is left exactly as it was before the call.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidAction {
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),

    #[error("{0} is not in the player's hand")]
    CardNotFound(CardId),

    #[error("{0} cannot be played on the current pile")]
    IllegalMove(CardId),

    #[error("a wild card needs a chosen color")]
    MissingColor,

    #[error("only the drawn card may be played after drawing")]
    MustPlayDrawnCard,

    #[error("a card has already been drawn this turn")]
    AlreadyHoldingDrawnCard,

    #[error("no drawn card to keep")]
    NoDrawnCard,

    #[error("a draw penalty of {0} must be resolved first")]
    PenaltyPending(u32),

    #[error("cannot declare low hand holding {0} cards")]
    TooManyCardsToDeclare(usize),

    #[error("the game is over")]
    GameOver,
}

/// Problems building the initial state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("{0} listed more than once")]
    DuplicatePlayer(PlayerId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Central engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The submitted action breaks a rule; nothing changed.
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),

    /// Deck and discard pile together could not cover a required draw.
    #[error("insufficient cards: needed {requested}, only {available} available")]
    InsufficientCards { requested: usize, available: usize },

    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("table is full ({max} players)")]
    RosterFull { max: usize },

    #[error("snapshot codec failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl EngineError {
    /// The rejection reason, if this is a rules rejection.
    #[must_use]
    pub fn as_invalid_action(&self) -> Option<&InvalidAction> {
        match self {
            EngineError::InvalidAction(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::from(InvalidAction::NotYourTurn(PlayerId::new(3)));
        assert_eq!(err.to_string(), "invalid action: it is not Player 3's turn");

        let err = EngineError::InsufficientCards { requested: 4, available: 1 };
        assert_eq!(err.to_string(), "insufficient cards: needed 4, only 1 available");

        let err = EngineError::from(SetupError::PlayerCount { count: 7, min: 1, max: 6 });
        assert_eq!(err.to_string(), "setup failed: player count 7 outside 1..=6");
    }

    #[test]
    fn test_as_invalid_action() {
        let err = EngineError::from(InvalidAction::MissingColor);
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::MissingColor));

        let err = EngineError::RosterFull { max: 6 };
        assert!(err.as_invalid_action().is_none());
    }
}
