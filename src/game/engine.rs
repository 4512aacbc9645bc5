//! The engine a host drives.
//!
//! `UnoEngine` owns the authoritative `GameState`. Every action and roster
//! event is applied to a working copy and committed only on success, so a
//! rejected action leaves no trace. The game-over observer fires once.

use tracing::{debug, info, warn};

use super::observer::GameObserver;
use crate::cards::{CardId, Color};
use crate::core::action::Action;
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::{GameState, PublicView};
use crate::rules::engine::{GameResult, Outcome, RulesEngine, UnoRules};
use crate::rules::roster;
use crate::rules::setup::setup;

/// Owning façade over the rules and the shared state.
pub struct UnoEngine {
    rules: UnoRules,
    state: GameState,
    observer: Option<Box<dyn GameObserver>>,
    /// Game over has already been reported.
    reported: bool,
    /// The state holds the canonical deck, so conservation is checked
    /// after each commit in debug builds.
    audited: bool,
}

impl std::fmt::Debug for UnoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnoEngine")
            .field("rules", &self.rules)
            .field("state", &self.state)
            .field("observer", &self.observer.is_some())
            .field("reported", &self.reported)
            .finish()
    }
}

impl UnoEngine {
    /// Set up a new game with a shuffle seeded from `seed`.
    pub fn new(config: GameConfig, players: &[PlayerId], seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, players, GameRng::new(seed))
    }

    /// Set up a new game driven by a host-supplied RNG.
    pub fn with_rng(config: GameConfig, players: &[PlayerId], rng: GameRng) -> Result<Self, EngineError> {
        let state = setup(&config, players, rng)?;
        Ok(Self {
            rules: UnoRules::new(config),
            state,
            observer: None,
            reported: false,
            audited: true,
        })
    }

    /// Resume from an existing state, e.g. a decoded snapshot.
    ///
    /// The configuration is validated as at setup. A state that already
    /// has a winner is not reported again.
    pub fn from_state(config: GameConfig, state: GameState) -> Result<Self, EngineError> {
        config.validate()?;
        let audited = state.audit_cards().is_ok();
        let reported = state.is_over();
        Ok(Self {
            rules: UnoRules::new(config),
            state,
            observer: None,
            reported,
            audited,
        })
    }

    /// Attach the game-over observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Replace the game-over observer.
    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn public_view(&self) -> PublicView {
        self.state.public_view()
    }

    /// Actions `player` may submit right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        self.rules.legal_actions(&self.state, player)
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }

    /// Apply one player action atomically.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<Outcome, EngineError> {
        let mut working = self.state.clone();
        match self.rules.apply_action(&mut working, player, &action) {
            Ok(outcome) => {
                self.commit(working);
                debug!(%player, action = action.name(), ?outcome, "Action applied");
                if let Outcome::GameOver { winner } = outcome {
                    self.report(winner);
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(%player, action = action.name(), error = %err, "Action rejected");
                Err(err)
            }
        }
    }

    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: CardId,
        chosen_color: Option<Color>,
    ) -> Result<Outcome, EngineError> {
        self.apply(player, Action::PlayCard { card, chosen_color })
    }

    pub fn draw_card(&mut self, player: PlayerId) -> Result<Outcome, EngineError> {
        self.apply(player, Action::DrawCard)
    }

    pub fn pass_turn(&mut self, player: PlayerId) -> Result<Outcome, EngineError> {
        self.apply(player, Action::PassTurn)
    }

    pub fn declare_low_hand(&mut self, player: PlayerId) -> Result<Outcome, EngineError> {
        self.apply(player, Action::DeclareLowHand)
    }

    /// Roster event: `player` joined the session.
    ///
    /// Returns `Ok(false)` if they were already seated.
    pub fn player_joined(&mut self, player: PlayerId) -> Result<bool, EngineError> {
        let mut working = self.state.clone();
        match roster::player_joined(&mut working, self.rules.config(), player) {
            Ok(joined) => {
                self.commit(working);
                Ok(joined)
            }
            Err(err) => {
                warn!(%player, error = %err, "Join rejected");
                Err(err)
            }
        }
    }

    /// Roster event: `player` left the session.
    ///
    /// Returns `false` if they were not seated.
    pub fn player_left(&mut self, player: PlayerId) -> bool {
        let left = roster::player_left(&mut self.state, player);
        if left {
            self.check_conservation();
        }
        left
    }

    /// Encode the current state.
    pub fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
        self.state.to_bytes()
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn commit(&mut self, state: GameState) {
        self.state = state;
        self.check_conservation();
    }

    fn check_conservation(&self) {
        if self.audited {
            debug_assert_eq!(self.state.audit_cards(), Ok(()), "card conservation violated");
        }
    }

    fn report(&mut self, winner: PlayerId) {
        if self.reported {
            return;
        }
        self.reported = true;
        info!(%winner, turn = self.state.turn_number, "Game over");
        if let Some(observer) = self.observer.as_mut() {
            observer.game_over(winner);
        }
    }
}
