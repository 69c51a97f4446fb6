//! Key mapping from terminal events to scene actions.

use crate::types::SceneAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to scene actions.
pub fn map_key(key: KeyEvent) -> Option<SceneAction> {
    if is_quit(key) {
        return Some(SceneAction::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(SceneAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(SceneAction::MoveRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(SceneAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(SceneAction::MoveDown),

        // Time
        KeyCode::Char('+') | KeyCode::Char('=') => Some(SceneAction::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(SceneAction::SpeedDown),

        // Spawning
        KeyCode::Char(' ') => Some(SceneAction::SpawnMarker),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(SceneAction::SpawnSquare),

        _ => None,
    }
}

/// Check if key should leave the scene.
pub fn is_quit(key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('x' | 'X' | 'q' | 'Q') | KeyCode::Esc => !ctrl,
        KeyCode::Char('c') => ctrl,
        _ => false,
    }
}
