use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Action {
    Start,
    Retry,
    Cancel,
    Quit,
}

/// Actions that respond to their key in the given phase. Anything else falls
/// through to normal key handling.
pub fn allowed_actions(phase: Phase) -> &'static [Action] {
    match phase {
        Phase::NotStarted => &[Action::Cancel, Action::Start],
        Phase::Countdown | Phase::Typing => &[Action::Cancel],
        Phase::ShowingResult => &[Action::Cancel, Action::Quit, Action::Retry],
    }
}

/// The action a key is bound to, regardless of phase.
pub fn binding(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char('c') if ctrl => Some(Action::Cancel),
        _ if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(' ') => Some(Action::Start),
        KeyCode::Char('r') => Some(Action::Retry),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

pub fn resolve(key: &KeyEvent, phase: Phase) -> Option<Action> {
    binding(key).filter(|action| allowed_actions(phase).contains(action))
}

/// The character a key types, if it is a plain (optionally shifted) char.
///
/// Enter and Tab type the line break and tab found in custom texts.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    let chorded = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    if chorded {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Tab => Some('\t'),
        _ => None,
    }
}
