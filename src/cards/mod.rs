//! Card system: colors, faces, card values, and the canonical deck.
//!
//! ## Key Types
//!
//! - `CardId`: Globally unique identifier assigned at deck construction
//! - `Color`: One of the four suit colors
//! - `Face`: Numeral or action face (skip, reverse, draw two, wilds)
//! - `Card`: An identified card; wild-family cards carry a color only
//!   while bound to a chosen color on the discard pile

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Color, Face};
pub use deck::{build_canonical_deck, shuffle, DECK_SIZE};
