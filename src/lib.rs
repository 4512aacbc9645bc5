//! # uno-engine
//!
//! Rule engine for a multiplayer shedding card game (an UNO variant).
//!
//! Given a list of player ids and a stream of player actions, the engine
//! keeps the authoritative shared state and enforces legal play: turn
//! direction, draw-card stacking, forced draws, the low-hand declaration
//! rule, mid-game joins and leaves, and the hand-emptying win.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: The whole game is one `GameState` value passed by
//!    reference into each transition. No globals.
//!
//! 2. **Results, Not Panics**: Every action returns `Result<Outcome, EngineError>`.
//!    A rejected action leaves the state unchanged.
//!
//! 3. **Deterministic**: Shuffles draw from a seeded `GameRng` stored in the
//!    state, so replicas applying the same actions compute the same game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, which makes
//!   apply-to-a-copy-then-commit cheap.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration, errors
//! - `cards`: Colors, faces, cards and the canonical deck
//! - `zones`: Draw deck and discard pile
//! - `rules`: Validator, turn controller, handlers, roster sync, setup
//! - `game`: `UnoEngine`, the façade a host drives
//!
//! ## Example
//!
//! ```
//! use uno_engine::{Action, GameConfig, PlayerId, UnoEngine};
//!
//! let players = [PlayerId::new(1), PlayerId::new(2)];
//! let mut engine = UnoEngine::new(GameConfig::default(), &players, 7).unwrap();
//!
//! let current = engine.state().current_player_id().unwrap();
//! let action = engine.legal_actions(current)[0];
//! engine.apply(current, action).unwrap();
//! ```

pub mod cards;
pub mod core;
pub mod game;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AuditError, Direction, EngineError, GameConfig, GameRng, GameRngState,
    GameState, InvalidAction, Player, PlayerId, PublicView, SeatView, SetupError, ShortfallPolicy,
    MAX_SEATS,
};

pub use crate::cards::{build_canonical_deck, Card, CardId, Color, Face, DECK_SIZE};

pub use crate::zones::Piles;

pub use crate::rules::{GameResult, Outcome, RulesEngine, UnoRules};

pub use crate::game::{GameObserver, UnoEngine};
