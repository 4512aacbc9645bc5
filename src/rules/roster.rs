//! Roster sync: players joining and leaving mid-game.
//!
//! A departing player's hand is cached under their id and handed back
//! verbatim if they return. Newcomers are dealt a fresh hand and seated
//! at the end of the turn order.

use tracing::info;

use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::player::{Player, PlayerId};
use crate::core::state::GameState;

/// Seat a player at the end of the turn order.
///
/// Returns `Ok(false)` if they are already seated. Whose turn it is does
/// not change.
pub fn player_joined(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
) -> Result<bool, EngineError> {
    if state.seat_of(player).is_some() {
        return Ok(false);
    }
    if state.player_count() >= config.max_players {
        return Err(EngineError::RosterFull {
            max: config.max_players,
        });
    }

    let rejoined = state.departed_hands.contains_key(&player);
    let hand = match state.departed_hands.remove(&player) {
        Some(hand) => hand,
        None => state
            .piles
            .deal(config.hand_size, config.shortfall, &mut state.rng)?
            .into_iter()
            .collect(),
    };
    let hand_size = hand.len();
    state.players.push_back(Player::with_hand(player, hand));

    state.last_action = format!("{player} joined");
    info!(%player, hand = hand_size, rejoined, seats = state.player_count(), "Player joined");
    Ok(true)
}

/// Remove a player from the turn order, caching their hand.
///
/// Returns `false` if they were not seated. If the leaver was on turn, a
/// held drawn card is forfeited under the draw deck; a pending draw stack
/// stays for whoever now occupies the turn.
pub fn player_left(state: &mut GameState, player: PlayerId) -> bool {
    let Some(seat) = state.seat_of(player) else {
        return false;
    };

    let leaver = state.players.remove(seat);
    state.departed_hands.insert(player, leaver.hand);

    if seat == state.current {
        if let Some(card) = state.drawn_card.take() {
            state.piles.tuck(card);
        }
    }

    if seat < state.current {
        state.current -= 1;
    }
    let count = state.player_count();
    state.current = if count == 0 { 0 } else { state.current % count };

    state.last_action = format!("{player} left");
    info!(%player, seats = count, draw_stack = state.draw_stack, "Player left");
    true
}
