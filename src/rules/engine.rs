//! Rules engine trait and the shedding-game implementation.
//!
//! `RulesEngine` is the seam between the game driver and the rules:
//! - What actions are legal
//! - How actions modify state
//! - Win conditions
//!
//! `UnoRules` dispatches each `Action` to its handler. Handlers validate
//! before mutating, but a handler that fails partway through a forced
//! draw may leave `state` modified; callers that need all-or-nothing
//! semantics apply to a clone and commit on success (see `UnoEngine`).

use super::handlers::{declare_low_hand, draw_card, pass_turn, play_card};
use super::validator::is_legal;
use crate::cards::{Card, Color};
use crate::core::action::Action;
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// What an accepted action did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Play goes on.
    Continue,
    /// The acting player emptied their hand.
    GameOver { winner: PlayerId },
}

impl Outcome {
    /// Winner, if this action ended the game.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Continue => None,
            Outcome::GameOver { winner } => Some(winner),
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Everybody left before anyone went out.
    Abandoned,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Abandoned => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `apply_action`: Must be deterministic given the state's RNG
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Enumerate every action `player` could submit right now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action to the game state.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Outcome, EngineError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Check whether `action` is among the legal actions.
    fn is_legal_action(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.legal_actions(state, player).contains(action)
    }
}

/// Rules of the shedding game.
#[derive(Clone, Debug, Default)]
pub struct UnoRules {
    config: GameConfig,
}

impl UnoRules {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl RulesEngine for UnoRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.is_over() || state.current_player_id() != Some(player) {
            return Vec::new();
        }
        let Some(seated) = state.current_player() else {
            return Vec::new();
        };

        let penalty = state.draw_stack > 0;
        let top = state.top_card();
        let mut actions = Vec::new();

        let mut push_plays = |card: &Card| {
            if !is_legal(card, top, state.active_color, penalty) {
                return;
            }
            if card.is_wild() {
                actions.extend(Color::ALL.iter().map(|&c| Action::play_wild(card.id, c)));
            } else {
                actions.push(Action::play(card.id));
            }
        };

        match &state.drawn_card {
            Some(card) => push_plays(card),
            None => seated.hand.iter().for_each(&mut push_plays),
        }

        if state.drawn_card.is_none() || penalty {
            actions.push(Action::DrawCard);
        }
        if state.drawn_card.is_some() && !penalty {
            actions.push(Action::PassTurn);
        }
        if seated.hand_size() <= self.config.low_hand_limit && !seated.declared_low_hand {
            actions.push(Action::DeclareLowHand);
        }

        actions
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Outcome, EngineError> {
        match *action {
            Action::PlayCard { card, chosen_color } => {
                play_card(state, &self.config, player, card, chosen_color)
            }
            Action::DrawCard => draw_card(state, &self.config, player),
            Action::PassTurn => pass_turn(state, player),
            Action::DeclareLowHand => declare_low_hand(state, &self.config, player),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if let Some(winner) = state.winner {
            return Some(GameResult::Winner(winner));
        }
        if state.players.is_empty() && !state.departed_hands.is_empty() {
            return Some(GameResult::Abandoned);
        }
        None
    }
}
