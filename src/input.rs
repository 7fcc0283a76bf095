//! Keyboard and pointer polling for the player's console.

use crate::render::cell_at;
use macroquad::prelude::{KeyCode, MouseButton, get_keys_pressed, is_mouse_button_pressed, mouse_position};
use robo_duel::debug_input;
use robo_duel::intent::{Intent, reload_key_intent, tap_intent};
use robo_duel::state::MatchState;
use robo_duel::types::Direction;

/// What the player asked for during one frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub start: bool,
    pub intents: Vec<Intent>,
}

pub fn intent_for_key(key: KeyCode, state: &MatchState) -> Option<Intent> {
    match key {
        KeyCode::Key6 | KeyCode::Up => Some(Intent::Move(Direction::Up)),
        KeyCode::Key7 | KeyCode::Down => Some(Intent::Move(Direction::Down)),
        KeyCode::Key9 | KeyCode::Left => Some(Intent::Move(Direction::Left)),
        KeyCode::Key8 | KeyCode::Right => Some(Intent::Move(Direction::Right)),
        KeyCode::Key5 => Some(Intent::Shoot),
        KeyCode::R => reload_key_intent(state),
        _ => None,
    }
}

pub fn is_start_key(key: KeyCode) -> bool {
    matches!(key, KeyCode::Enter | KeyCode::KpEnter | KeyCode::Space)
}

/// Maps one batch of pressed keys (and an optional click) onto the console.
pub fn collect(
    keys: impl IntoIterator<Item = KeyCode>,
    click: Option<(f32, f32)>,
    state: &MatchState,
) -> FrameInput {
    let mut input = FrameInput::default();
    for key in keys {
        if is_start_key(key) {
            // Start only means something outside of play
            input.start |= !state.phase.is_running();
        } else if let Some(intent) = intent_for_key(key, state) {
            debug_input!("key {:?} -> {:?}", key, intent);
            input.intents.push(intent);
        }
    }

    if let Some((x, y)) = click {
        if let Some(intent) = cell_at(x, y).and_then(|cell| tap_intent(state, cell)) {
            debug_input!("tap at ({:.0}, {:.0}) -> {:?}", x, y, intent);
            input.intents.push(intent);
        }
    }
    input
}

pub fn poll(state: &MatchState) -> FrameInput {
    let click = is_mouse_button_pressed(MouseButton::Left).then(mouse_position);
    collect(get_keys_pressed(), click, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cell_origin;
    use robo_duel::config::CELL_SIZE;
    use robo_duel::types::{Phase, Position};

    fn teleop() -> MatchState {
        let mut state = MatchState::new();
        state.phase = Phase::Teleop;
        state
    }

    #[test]
    fn test_number_and_arrow_keys() {
        let state = teleop();
        let pairs = [
            (KeyCode::Key6, KeyCode::Up, Direction::Up),
            (KeyCode::Key7, KeyCode::Down, Direction::Down),
            (KeyCode::Key9, KeyCode::Left, Direction::Left),
            (KeyCode::Key8, KeyCode::Right, Direction::Right),
        ];
        for (digit, arrow, direction) in pairs {
            assert_eq!(intent_for_key(digit, &state), Some(Intent::Move(direction)));
            assert_eq!(intent_for_key(arrow, &state), Some(Intent::Move(direction)));
        }
        assert_eq!(intent_for_key(KeyCode::Key5, &state), Some(Intent::Shoot));
        assert_eq!(intent_for_key(KeyCode::Q, &state), None);
    }

    #[test]
    fn test_reload_key_needs_reloader() {
        let mut state = teleop();
        assert_eq!(intent_for_key(KeyCode::R, &state), None);
        state.user.position = Position::new(0, 6);
        assert_eq!(intent_for_key(KeyCode::R, &state), Some(Intent::Reload));
    }

    #[test]
    fn test_start_key_only_outside_play() {
        let mut state = MatchState::new();
        assert!(collect([KeyCode::Enter], None, &state).start);
        assert!(collect([KeyCode::Space], None, &state).start);

        state.phase = Phase::Auto;
        let input = collect([KeyCode::Enter, KeyCode::Key5], None, &state);
        assert!(!input.start);
        assert_eq!(input.intents, vec![Intent::Shoot]);

        state.phase = Phase::Ended;
        assert!(collect([KeyCode::KpEnter], None, &state).start);
    }

    #[test]
    fn test_click_on_own_robot_at_reloader() {
        let mut state = teleop();
        state.user.position = Position::new(0, 6);
        let corner = cell_origin(state.user.position);
        let click = (corner.x + CELL_SIZE / 2.0, corner.y + CELL_SIZE / 2.0);
        assert_eq!(collect(Vec::<KeyCode>::new(), Some(click), &state).intents, vec![Intent::Reload]);

        // Off the board
        assert!(collect(Vec::<KeyCode>::new(), Some((1.0, 1.0)), &state).intents.is_empty());
    }
}
