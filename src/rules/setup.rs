//! Initial state construction.
//!
//! Setup shuffles the canonical deck, deals a hand to each player in seat
//! order, and flips a start card. A wild draw four may never start the game:
//! it goes back into the deck, which is reshuffled before flipping again.
//! The start card's effect on turn order and the draw stack is applied as
//! if it had been played just before seat 0, without a catch-penalty.

use rustc_hash::FxHashSet;
use tracing::info;

use super::handlers::resolve_pending_stack;
use super::turn::{advance, apply_card_effect};
use crate::cards::{build_canonical_deck, shuffle, Card, Face};
use crate::core::config::{GameConfig, ShortfallPolicy};
use crate::core::error::{EngineError, SetupError};
use crate::core::player::{Player, PlayerId};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::zones::Piles;

/// Build the opening state for `players` from a freshly shuffled deck.
pub fn setup(
    config: &GameConfig,
    players: &[PlayerId],
    mut rng: GameRng,
) -> Result<GameState, EngineError> {
    // The opening shuffle runs on its own fork; `rng` stays with the state
    // for start-card redraws and later reshuffles.
    let mut dealer = rng.fork();
    let mut deck = build_canonical_deck();
    shuffle(&mut deck, &mut dealer);
    setup_with_deck(config, players, deck, rng)
}

/// Build the opening state from a deck in the given order (top = last).
///
/// Hosts replaying a recorded deal, and tests, use this to control the
/// exact cards dealt.
pub fn setup_with_deck(
    config: &GameConfig,
    players: &[PlayerId],
    deck: Vec<Card>,
    rng: GameRng,
) -> Result<GameState, EngineError> {
    config.validate()?;

    let count = players.len();
    if count < config.min_players || count > config.max_players {
        return Err(SetupError::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        }
        .into());
    }
    let mut seen = FxHashSet::default();
    for &player in players {
        if !seen.insert(player) {
            return Err(SetupError::DuplicatePlayer(player).into());
        }
    }

    let mut state = GameState::new(Piles::new(deck), rng);
    for &player in players {
        let hand = state
            .piles
            .deal(config.hand_size, ShortfallPolicy::Reject, &mut state.rng)?;
        state
            .players
            .push_back(Player::with_hand(player, hand.into_iter().collect()));
    }

    let start = flip_start_card(&mut state)?;
    state.piles.discard(start);
    state.active_color = start.color.unwrap_or(config.fallback_color);
    state.last_action = format!("Game started with {start}");

    let skip = apply_card_effect(&mut state, start.face);
    if skip {
        advance(&mut state);
    }
    resolve_pending_stack(&mut state, config)?;

    info!(
        players = count,
        start = %start,
        active_color = %state.active_color,
        current = ?state.current_player_id(),
        "Game set up"
    );
    Ok(state)
}

/// Take the first card off the deck that is not a wild draw four.
fn flip_start_card(state: &mut GameState) -> Result<Card, EngineError> {
    if !state.piles.deck.iter().any(|c| c.face != Face::WildDrawFour) {
        return Err(EngineError::InsufficientCards {
            requested: 1,
            available: 0,
        });
    }

    loop {
        let Some(card) = state.piles.deck.pop_back() else {
            return Err(EngineError::InsufficientCards {
                requested: 1,
                available: 0,
            });
        };
        if card.face != Face::WildDrawFour {
            return Ok(card);
        }

        state.piles.deck.push_back(card);
        let mut cards: Vec<Card> = std::mem::take(&mut state.piles.deck).into_iter().collect();
        shuffle(&mut cards, &mut state.rng);
        state.piles.deck = cards.into_iter().collect();
    }
}
