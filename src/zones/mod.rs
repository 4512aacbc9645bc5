//! Deck and discard pile management.
//!
//! ## Key Types
//!
//! - `Piles`: The shared draw deck and discard pile, with reshuffle
//! - `Dealt`: Small buffer of cards returned by one draw request

pub mod piles;

pub use piles::{Dealt, Piles};
