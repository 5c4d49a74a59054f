//! Key-to-command mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use duel_tetris_types::{BoardCommand, PlayerSlot};

/// What a key press means to the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A command for one player's board.
    Player(PlayerSlot, BoardCommand),
    /// Toggle the ghost preview on both boards.
    ToggleGhost,
    /// Start a fresh round (menu / game-over screens).
    Restart,
    Quit,
}

/// Map a key event to an input event, or `None` for unbound keys.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    use BoardCommand::*;
    use PlayerSlot::{One, Two};

    let event = match key.code {
        // Player one: WASD cluster.
        KeyCode::Char('a') | KeyCode::Char('A') => InputEvent::Player(One, MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => InputEvent::Player(One, MoveRight),
        KeyCode::Char('s') | KeyCode::Char('S') => InputEvent::Player(One, SoftDrop),
        KeyCode::Char('w') | KeyCode::Char('W') => InputEvent::Player(One, RotateRight),
        KeyCode::Char('q') | KeyCode::Char('Q') => InputEvent::Player(One, RotateLeft),
        KeyCode::Char(' ') => InputEvent::Player(One, HardDrop),

        // Player two: arrow cluster.
        KeyCode::Left => InputEvent::Player(Two, MoveLeft),
        KeyCode::Right => InputEvent::Player(Two, MoveRight),
        KeyCode::Down => InputEvent::Player(Two, SoftDrop),
        KeyCode::Up => InputEvent::Player(Two, RotateRight),
        KeyCode::Char('m') | KeyCode::Char('M') => InputEvent::Player(Two, RotateLeft),
        KeyCode::Char('n') | KeyCode::Char('N') => InputEvent::Player(Two, HardDrop),

        KeyCode::Char('g') | KeyCode::Char('G') => InputEvent::ToggleGhost,
        KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Restart,
        KeyCode::Esc => InputEvent::Quit,
        _ => return None,
    };
    Some(event)
}
