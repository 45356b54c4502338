#![forbid(unsafe_code)]

//! Key-to-action mapping.
//!
//! The same key means different things on the input form and while stepping
//! (Enter starts a problem on the form and steps forward afterwards), so
//! resolution takes the current [`Mode`].
//!
//! | Mode     | Keys                        | Action          |
//! |----------|-----------------------------|-----------------|
//! | Input    | `0`-`9`                     | `Digit`         |
//! | Input    | Backspace                   | `DeleteDigit`   |
//! | Input    | Tab / Shift-Tab             | `NextField` / `PrevField` |
//! | Input    | Up / Down                   | `PrevPreset` / `NextPreset` |
//! | Input    | Enter                       | `Start`         |
//! | Stepping | Right, `l`, Space, Enter    | `Forward`       |
//! | Stepping | Left, `h`                   | `Backward`      |
//! | Stepping | Home / End                  | `SeekStart` / `SeekEnd` |
//! | Stepping | `r`                         | `Reset`         |
//! | Stepping | `n`                         | `NewProblem`    |
//! | Stepping | Tab                         | `ToggleHistory` |
//! | Any      | Esc, Ctrl-C, `q` (stepping) | `Quit`          |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which screen is receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Input,
    Stepping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(char),
    DeleteDigit,
    NextField,
    PrevField,
    PrevPreset,
    NextPreset,
    Start,
    Forward,
    Backward,
    SeekStart,
    SeekEnd,
    Reset,
    NewProblem,
    ToggleHistory,
    Quit,
}

/// Resolve a key press to an action. Releases and unbound keys yield `None`.
#[must_use]
pub fn resolve(key: &KeyEvent, mode: Mode) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'C')) {
        return Some(Action::Quit);
    }
    if key.code == KeyCode::Esc {
        return Some(Action::Quit);
    }
    if ctrl {
        return None;
    }

    match mode {
        Mode::Input => resolve_input(key.code),
        Mode::Stepping => resolve_stepping(key.code),
    }
}

fn resolve_input(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::Digit(c)),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::DeleteDigit),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PrevField),
        KeyCode::Up => Some(Action::PrevPreset),
        KeyCode::Down => Some(Action::NextPreset),
        KeyCode::Enter => Some(Action::Start),
        _ => None,
    }
}

fn resolve_stepping(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('l' | ' ') => Some(Action::Forward),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Backward),
        KeyCode::Home => Some(Action::SeekStart),
        KeyCode::End => Some(Action::SeekEnd),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('n') => Some(Action::NewProblem),
        KeyCode::Tab => Some(Action::ToggleHistory),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
