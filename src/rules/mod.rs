//! Game rules.
//!
//! - `validator`: which card may be played on which
//! - `turn`: seat arithmetic and turn-order effects
//! - `handlers`: the four player actions
//! - `roster`: players joining and leaving mid-game
//! - `setup`: dealing and the start card
//! - `engine`: `RulesEngine` trait and `UnoRules`
//!
//! The driver calls into `RulesEngine`; everything below it works on a
//! `GameState` passed in by the caller.

pub mod engine;
pub mod handlers;
pub mod roster;
pub mod setup;
pub mod turn;
pub mod validator;

pub use engine::{GameResult, Outcome, RulesEngine, UnoRules};
pub use handlers::{declare_low_hand, draw_card, pass_turn, play_card};
pub use roster::{player_joined, player_left};
pub use setup::{setup, setup_with_deck};
pub use turn::{advance, apply_card_effect, next_seat};
pub use validator::{check_play, is_legal};
