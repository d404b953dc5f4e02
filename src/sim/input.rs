//! Keyboard intents
//!
//! Key handlers only flip these flags; the tick consumes them and clears a
//! flag itself when the player reaches a vertical bound.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

/// Vertical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub move_up: bool,
    pub move_down: bool,
}

impl Intents {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.move_up = held,
            Direction::Down => self.move_down = held,
        }
    }
}

/// Key pressed or released. Ignored while game over is latched.
pub fn set_intent(state: &mut GameState, direction: Direction, held: bool) {
    if state.phase == GamePhase::GameOverPrompt {
        return;
    }
    state.intents.set(direction, held);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("w"), None);
    }

    #[test]
    fn test_press_and_release() {
        let settings = Settings {
            enemy_count: 0,
            ..Default::default()
        };
        let mut state = GameState::new(settings, 1, 800.0, 600.0).unwrap();

        set_intent(&mut state, Direction::Up, true);
        set_intent(&mut state, Direction::Down, true);
        assert!(state.intents.move_up && state.intents.move_down);

        set_intent(&mut state, Direction::Up, false);
        assert!(!state.intents.move_up);
        assert!(state.intents.move_down);
    }

    #[test]
    fn test_ignored_while_game_over() {
        let settings = Settings {
            enemy_count: 0,
            ..Default::default()
        };
        let mut state = GameState::new(settings, 1, 800.0, 600.0).unwrap();
        state.phase = GamePhase::GameOverPrompt;

        set_intent(&mut state, Direction::Down, true);
        assert_eq!(state.intents, Intents::default());
    }
}
