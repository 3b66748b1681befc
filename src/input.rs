//! Keyboard handling for the terminal quiz.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shape_quiz::quiz::{QuizInput, NUM_CHOICES};

/// What a key press means to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quiz(QuizInput),
    Quit,
    Ignored,
}

/// Map a key to a quiz action. Enter checks the answer while the prompt is
/// active and moves on once the result is shown.
pub fn map_key(key: KeyEvent, prompt_active: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as u32 - '1' as u32) as usize;
            if index < NUM_CHOICES {
                KeyAction::Quiz(QuizInput::Toggle(index))
            } else {
                KeyAction::Ignored
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if prompt_active {
                KeyAction::Quiz(QuizInput::Check)
            } else {
                KeyAction::Quiz(QuizInput::Next)
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') => KeyAction::Quiz(QuizInput::Next),
        KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Quiz(QuizInput::Skip),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Ignored,
    }
}
