//! Abstract player intents, as produced by the input adapters.

use crate::state::MatchState;
use crate::types::{Direction, Phase, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Shoot,
    Reload,
}

/// Pointer taps only mean something on the player's own robot while it
/// stands on its reloader.
pub fn tap_intent(state: &MatchState, cell: Position) -> Option<Intent> {
    if state.phase == Phase::Teleop && cell == state.user.position && state.user.is_on_reloader() {
        Some(Intent::Reload)
    } else {
        None
    }
}

/// The reload key is only forwarded while the player is on the reloader.
pub fn reload_key_intent(state: &MatchState) -> Option<Intent> {
    state.user.is_on_reloader().then_some(Intent::Reload)
}
