//! Shared helpers for integration tests.
//!
//! Tables are arranged from the canonical deck: requested cards are pulled
//! out of it and everything left becomes the draw deck, so card
//! conservation holds from the first action.

#![allow(dead_code)]

use uno_engine::{
    build_canonical_deck, Card, Color, Face, GameConfig, GameRng, GameState, Piles, Player, PlayerId,
    UnoEngine,
};

/// A card by color and face; `None` color for wild-family cards.
pub type Kind = (Option<Color>, Face);

pub const fn red(face: Face) -> Kind {
    (Some(Color::Red), face)
}

pub const fn blue(face: Face) -> Kind {
    (Some(Color::Blue), face)
}

pub const fn green(face: Face) -> Kind {
    (Some(Color::Green), face)
}

pub const fn yellow(face: Face) -> Kind {
    (Some(Color::Yellow), face)
}

pub const fn wild(face: Face) -> Kind {
    (None, face)
}

/// Install a fmt subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then "warn".
pub fn init_tracing() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(tracing_subscriber::EnvFilter::new)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

pub fn ids(n: u32) -> Vec<PlayerId> {
    (0..n).map(PlayerId::new).collect()
}

/// Remove the first card matching `kind` from `deck`.
pub fn take(deck: &mut Vec<Card>, kind: Kind) -> Card {
    let pos = deck
        .iter()
        .position(|c| (c.color, c.face) == kind)
        .unwrap_or_else(|| panic!("no {kind:?} left in deck"));
    deck.remove(pos)
}

/// Seat players 0..n with the given hands over `top`.
///
/// Player 0 is on turn, direction is clockwise, the active color is the
/// top card's color (or red for a wild top).
pub fn table(hands: &[&[Kind]], top: Kind) -> GameState {
    let mut deck = build_canonical_deck();
    let top = take(&mut deck, top);
    let hands: Vec<Vec<Card>> = hands
        .iter()
        .map(|hand| hand.iter().map(|&kind| take(&mut deck, kind)).collect())
        .collect();

    let mut state = GameState::new(Piles::new(deck), GameRng::new(7));
    for (id, hand) in hands.into_iter().enumerate() {
        state
            .players
            .push_back(Player::with_hand(PlayerId::new(id as u32), hand.into_iter().collect()));
    }
    state.piles.discard(top);
    state.active_color = top.color.unwrap_or(Color::Red);
    state
}

/// Engine over an arranged table with the default configuration.
pub fn engine(hands: &[&[Kind]], top: Kind) -> UnoEngine {
    init_tracing();
    UnoEngine::from_state(GameConfig::default(), table(hands, top)).unwrap()
}

/// Canonical deck arranged so `players` hands of `hand_size` are dealt
/// first and `start` is flipped next.
pub fn deck_with_start(players: usize, hand_size: usize, start: Kind) -> Vec<Card> {
    let mut deck = build_canonical_deck();
    let start = take(&mut deck, start);
    let at = deck.len() - players * hand_size;
    deck.insert(at, start);
    deck
}

/// Id of the first card in `player`'s hand matching `kind`.
pub fn card_in_hand(state: &GameState, player: PlayerId, kind: Kind) -> uno_engine::CardId {
    state
        .hand(player)
        .and_then(|hand| hand.iter().find(|c| (c.color, c.face) == kind))
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("{player} holds no {kind:?}"))
}

pub fn assert_conserved(state: &GameState) {
    assert_eq!(state.audit_cards(), Ok(()), "card conservation violated");
}

pub fn hand_size(state: &GameState, player: PlayerId) -> usize {
    state.player(player).map_or(0, Player::hand_size)
}
