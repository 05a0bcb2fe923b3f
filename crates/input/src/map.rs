//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::MoveRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::MoveDown),

        // Remove the group under the cursor
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Activate),

        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::OpenMenu),

        // Save slot
        KeyCode::F(2) | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SaveRequest),
        KeyCode::F(3) | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::LoadRequest),

        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NewGameRequest),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
