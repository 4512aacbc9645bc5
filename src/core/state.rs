//! Game state: the single authoritative aggregate and its projections.
//!
//! ## GameState
//!
//! Complete game state owned by the engine:
//! - Draw deck and discard pile
//! - Seated players with their hands, in turn order
//! - Turn pointer, direction, active color, pending draw stack
//! - The held drawn card, if any
//! - Hands of departed players, kept for rejoin
//! - Action history and the deterministic RNG
//!
//! ## PublicView
//!
//! Observable information safe to show every participant: hand sizes but
//! never hand contents.
//!
//! The aggregate is built on `im` persistent collections, so cloning it for
//! a tentative transition is cheap.

use im::{OrdMap, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionRecord;
use super::error::EngineError;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{Card, CardId, Color, DECK_SIZE};
use crate::zones::Piles;

/// Turn order direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Seat indices increase.
    #[default]
    Clockwise,
    /// Seat indices decrease.
    CounterClockwise,
}

impl Direction {
    /// Seat offset per step: +1 or -1.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Card-conservation failures found by `GameState::audit_cards`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("{0} appears more than once")]
    Duplicate(CardId),
    #[error("{0} is not part of the canonical deck")]
    Unknown(CardId),
    #[error("{0} cards missing from play")]
    Missing(usize),
}

/// Full game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Draw deck and discard pile.
    pub piles: Piles,

    /// Seated players in turn order.
    pub players: Vector<Player>,

    /// Seat index of the player to act. Meaningless when no one is seated.
    pub current: usize,

    pub direction: Direction,

    /// Color in force for matching. Never absent.
    pub active_color: Color,

    pub winner: Option<PlayerId>,

    /// Card drawn voluntarily this turn and not yet played or kept.
    pub drawn_card: Option<Card>,

    /// Human-readable description of the last accepted transition.
    pub last_action: String,

    /// Pending forced-draw count from chained draw cards.
    pub draw_stack: u32,

    /// Hands of players who left, restored if they rejoin. Ordered by id so
    /// every replica encodes it identically.
    pub departed_hands: OrdMap<PlayerId, Vector<Card>>,

    /// Turn counter (starts at 1, increments on every advance).
    pub turn_number: u32,

    /// Accepted actions in order.
    pub history: Vector<ActionRecord>,

    /// Deterministic RNG shared by every replica.
    pub rng: GameRng,
}

impl GameState {
    /// Create an empty state around prepared piles.
    #[must_use]
    pub fn new(piles: Piles, rng: GameRng) -> Self {
        Self {
            piles,
            players: Vector::new(),
            current: 0,
            direction: Direction::Clockwise,
            active_color: Color::Red,
            winner: None,
            drawn_card: None,
            last_action: String::new(),
            draw_stack: 0,
            departed_hands: OrdMap::new(),
            turn_number: 1,
            history: Vector::new(),
            rng,
        }
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Has someone emptied their hand?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    /// Look up a seated player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player)
    }

    /// A seated player's private hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&Vector<Card>> {
        self.player(player).map(|p| &p.hand)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(|p| p.id)
    }

    /// Top of the discard pile.
    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.piles.top()
    }

    /// Append an accepted action to the history.
    pub fn record_action(&mut self, player: PlayerId, action: super::action::Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }

    /// Observable projection for broadcasting.
    #[must_use]
    pub fn public_view(&self) -> PublicView {
        PublicView {
            seats: self
                .players
                .iter()
                .map(|p| SeatView {
                    id: p.id,
                    hand_size: p.hand_size(),
                    declared_low_hand: p.declared_low_hand,
                })
                .collect(),
            current_player: self.current_player_id(),
            direction: self.direction,
            active_color: self.active_color,
            top_card: self.top_card().copied(),
            deck_size: self.piles.deck_size(),
            draw_stack: self.draw_stack,
            holding_drawn_card: self.drawn_card.is_some(),
            winner: self.winner,
            last_action: self.last_action.clone(),
        }
    }

    /// Every card the state accounts for, wherever it sits.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.piles
            .iter()
            .chain(self.players.iter().flat_map(|p| p.hand.iter()))
            .chain(self.drawn_card.iter())
            .chain(self.departed_hands.values().flat_map(|hand| hand.iter()))
    }

    /// Verify that deck, discard pile, hands, the held card and departed
    /// hands together hold exactly the canonical 108 cards.
    pub fn audit_cards(&self) -> Result<(), AuditError> {
        let mut seen = FxHashSet::default();
        for card in self.all_cards() {
            if card.id.raw() as usize >= DECK_SIZE {
                return Err(AuditError::Unknown(card.id));
            }
            if !seen.insert(card.id) {
                return Err(AuditError::Duplicate(card.id));
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(AuditError::Missing(DECK_SIZE - seen.len()));
        }
        Ok(())
    }

    /// Encode the full aggregate for the host's persistence layer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// One seat as seen by everyone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub hand_size: usize,
    pub declared_low_hand: bool,
}

/// Read-only projection of `GameState` without private hands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    pub seats: Vec<SeatView>,
    pub current_player: Option<PlayerId>,
    pub direction: Direction,
    pub active_color: Color,
    pub top_card: Option<Card>,
    pub deck_size: usize,
    pub draw_stack: u32,
    pub holding_drawn_card: bool,
    pub winner: Option<PlayerId>,
    pub last_action: String,
}
