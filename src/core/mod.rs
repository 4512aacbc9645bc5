//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! This module contains the data model every rules component works on.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, ShortfallPolicy, MAX_SEATS};
pub use error::{EngineError, InvalidAction, SetupError};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{AuditError, Direction, GameState, PublicView, SeatView};
