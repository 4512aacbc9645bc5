//! Outbound game-over signal.

use crate::core::player::PlayerId;

/// Receives the terminal outcome of a game.
///
/// `UnoEngine` calls `game_over` exactly once, when a hand first reaches
/// zero cards. Any `FnMut(PlayerId)` closure is an observer.
pub trait GameObserver: Send {
    fn game_over(&mut self, winner: PlayerId);
}

impl<F> GameObserver for F
where
    F: FnMut(PlayerId) + Send,
{
    fn game_over(&mut self, winner: PlayerId) {
        self(winner);
    }
}
