//! Non-blocking crossterm input source.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::core::InputSource;
use crate::map::map_key;
use crate::types::SceneAction;

/// Reads at most one terminal event per poll without waiting.
///
/// Non-key events (resize, focus, mouse) and unmapped keys count as "no
/// input"; the renderer picks up size changes on its own.
#[derive(Debug, Default)]
pub struct TerminalInput {
    _private: (),
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    fn poll_action(&mut self) -> io::Result<Option<SceneAction>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            Event::Key(key) => action_for(key),
            _ => None,
        })
    }
}

/// Presses and auto-repeats act; releases are ignored.
fn action_for(key: KeyEvent) -> Option<SceneAction> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => map_key(key),
        KeyEventKind::Release => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn release_events_are_ignored() {
        assert_eq!(action_for(with_kind(KeyCode::Left, KeyEventKind::Release)), None);
    }

    #[test]
    fn repeats_behave_like_presses() {
        assert_eq!(
            action_for(with_kind(KeyCode::Left, KeyEventKind::Repeat)),
            Some(SceneAction::MoveLeft)
        );
        assert_eq!(
            action_for(with_kind(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(SceneAction::SpawnMarker)
        );
    }
}
