//! Keyboard input mapping
//!
//! Terminals report key presses (and auto-repeats) but usually not releases,
//! so paddle movement is held for a few ticks after each press.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Command, Direction, Mode};

/// Ticks a paddle key stays "down" after its latest press or repeat
pub const HOLD_TICKS: u32 = 8;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the match controller
    Command(Command),
    /// Paddle key went down or up (handled by `HeldKeys`)
    Paddle(Direction, bool),
    /// Mute/unmute sound effects
    ToggleSound,
    /// Leave immediately (Ctrl+C)
    Quit,
}

/// Translate a key event for the current mode
pub fn map_key(mode: Mode, key: &KeyEvent) -> Option<InputAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputAction::Quit);
    }

    let pressed = key.kind != KeyEventKind::Release;
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match mode {
        Mode::Playing => match code {
            KeyCode::Char('w') | KeyCode::Up => Some(InputAction::Paddle(Direction::Up, pressed)),
            KeyCode::Char('s') | KeyCode::Down => {
                Some(InputAction::Paddle(Direction::Down, pressed))
            }
            KeyCode::Char('m') if pressed => Some(InputAction::ToggleSound),
            _ => None,
        },
        _ if !pressed => None,
        Mode::Menu => match code {
            KeyCode::Up => Some(Command::MenuNavigate(Direction::Up)),
            KeyCode::Down => Some(Command::MenuNavigate(Direction::Down)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::MenuConfirm),
            KeyCode::Esc => Some(Command::MenuQuit),
            _ => None,
        }
        .map(InputAction::Command),
        Mode::GameOver => match code {
            KeyCode::Char(' ') => Some(InputAction::Command(Command::ContinueGame)),
            _ => None,
        },
        Mode::SeriesOver => match code {
            KeyCode::Char(' ') | KeyCode::Char('r') => {
                Some(InputAction::Command(Command::ResetSeries))
            }
            KeyCode::Esc => Some(InputAction::Command(Command::MenuQuit)),
            _ => None,
        },
    }
}

/// Paddle keys currently considered held
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    direction: Option<Direction>,
    ticks_left: u32,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a paddle key going down (`true`) or up (`false`)
    pub fn set(&mut self, direction: Direction, down: bool) {
        if down {
            self.direction = Some(direction);
            self.ticks_left = HOLD_TICKS;
        } else if self.direction == Some(direction) {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.direction = None;
        self.ticks_left = 0;
    }

    /// Movement command for this tick, if a key is held
    pub fn next_tick(&mut self) -> Option<Command> {
        let direction = self.direction?;
        if self.ticks_left == 0 {
            self.direction = None;
            return None;
        }
        self.ticks_left -= 1;
        Some(Command::MovePlayer(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            map_key(Mode::Menu, &press(KeyCode::Down)),
            Some(InputAction::Command(Command::MenuNavigate(Direction::Down)))
        );
        assert_eq!(
            map_key(Mode::Menu, &press(KeyCode::Enter)),
            Some(InputAction::Command(Command::MenuConfirm))
        );
        assert_eq!(
            map_key(Mode::Menu, &press(KeyCode::Esc)),
            Some(InputAction::Command(Command::MenuQuit))
        );
        assert_eq!(map_key(Mode::Menu, &release(KeyCode::Enter)), None);
    }

    #[test]
    fn test_playing_keys() {
        assert_eq!(
            map_key(Mode::Playing, &press(KeyCode::Char('W'))),
            Some(InputAction::Paddle(Direction::Up, true))
        );
        assert_eq!(
            map_key(Mode::Playing, &release(KeyCode::Down)),
            Some(InputAction::Paddle(Direction::Down, false))
        );
        assert_eq!(
            map_key(Mode::Playing, &press(KeyCode::Char('m'))),
            Some(InputAction::ToggleSound)
        );
        assert_eq!(map_key(Mode::Playing, &press(KeyCode::Esc)), None);
    }

    #[test]
    fn test_between_games_keys() {
        assert_eq!(
            map_key(Mode::GameOver, &press(KeyCode::Char(' '))),
            Some(InputAction::Command(Command::ContinueGame))
        );
        assert_eq!(
            map_key(Mode::SeriesOver, &press(KeyCode::Char('r'))),
            Some(InputAction::Command(Command::ResetSeries))
        );
        assert_eq!(
            map_key(Mode::SeriesOver, &press(KeyCode::Esc)),
            Some(InputAction::Command(Command::MenuQuit))
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [Mode::Menu, Mode::Playing, Mode::GameOver, Mode::SeriesOver] {
            assert_eq!(map_key(mode, &key), Some(InputAction::Quit));
        }
    }

    #[test]
    fn test_held_key_expires() {
        let mut held = HeldKeys::new();
        assert_eq!(held.next_tick(), None);

        held.set(Direction::Up, true);
        for _ in 0..HOLD_TICKS {
            assert_eq!(held.next_tick(), Some(Command::MovePlayer(Direction::Up)));
        }
        assert_eq!(held.next_tick(), None);
    }

    #[test]
    fn test_release_stops_matching_direction_only() {
        let mut held = HeldKeys::new();
        held.set(Direction::Down, true);
        held.set(Direction::Up, false);
        assert_eq!(held.next_tick(), Some(Command::MovePlayer(Direction::Down)));
        held.set(Direction::Down, false);
        assert_eq!(held.next_tick(), None);
    }
}
