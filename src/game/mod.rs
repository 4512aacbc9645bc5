//! Host-facing engine.
//!
//! `UnoEngine` wraps `UnoRules` and the authoritative `GameState`:
//! - Applies actions and roster events all-or-nothing
//! - Reports the winner to a `GameObserver` exactly once

mod engine;
mod observer;

pub use engine::UnoEngine;
pub use observer::GameObserver;
