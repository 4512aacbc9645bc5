//! Move validator.
//!
//! Rules, checked in order:
//! 1. A wild-family card may always be named as a play.
//! 2. While a draw penalty is pending on a draw card, only another draw
//!    card may answer it ("stack or absorb"); matching is bypassed.
//! 3. Otherwise the card must match the active color or the top card's face.
//!
//! Wild-family cards additionally need a chosen color.

use crate::cards::{Card, Color};
use crate::core::error::InvalidAction;

/// Is `card` a legal play on `top`?
#[must_use]
pub fn is_legal(card: &Card, top: Option<&Card>, active_color: Color, penalty_pending: bool) -> bool {
    if card.is_wild() {
        return true;
    }

    let color_match = card.color == Some(active_color);
    let Some(top) = top else {
        return color_match;
    };

    if penalty_pending && top.is_draw() {
        return card.is_draw();
    }

    color_match || card.face == top.face
}

/// Validate a proposed play and resolve the color it puts in force.
pub fn check_play(
    card: &Card,
    chosen_color: Option<Color>,
    top: Option<&Card>,
    active_color: Color,
    penalty_pending: bool,
) -> Result<Color, InvalidAction> {
    if !is_legal(card, top, active_color, penalty_pending) {
        return Err(InvalidAction::IllegalMove(card.id));
    }

    if card.is_wild() {
        chosen_color.ok_or(InvalidAction::MissingColor)
    } else {
        card.color.ok_or(InvalidAction::IllegalMove(card.id))
    }
}
