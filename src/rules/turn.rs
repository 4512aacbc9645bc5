//! Turn controller: seat arithmetic and the turn-order effects of cards.

use crate::cards::Face;
use crate::core::state::{Direction, GameState};

/// Seat that follows `current` in `direction` at a table of `count`.
///
/// With nobody seated the answer is 0.
#[must_use]
pub fn next_seat(current: usize, direction: Direction, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (current as isize + direction.step()).rem_euclid(count as isize) as usize
}

/// Pass the turn to the next seat.
pub fn advance(state: &mut GameState) {
    state.current = next_seat(state.current, state.direction, state.player_count());
    state.turn_number += 1;
}

/// Apply a card's effect on turn order and the draw stack.
///
/// Returns `true` when the next player must be skipped. A reverse at a
/// two-player table acts as a skip; with more players it flips direction.
/// Draw cards add to the draw stack instead of dealing immediately.
pub fn apply_card_effect(state: &mut GameState, face: Face) -> bool {
    match face {
        Face::Skip => true,
        Face::Reverse if state.player_count() == 2 => true,
        Face::Reverse => {
            state.direction = state.direction.reversed();
            false
        }
        Face::DrawTwo | Face::WildDrawFour => {
            state.draw_stack += face.draw_penalty();
            false
        }
        Face::Number(_) | Face::Wild => false,
    }
}
