//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Select,
    Confirm,
    Cancel,
    Submit,
    OpenMenu,
    OpenSearch,
    NewItem,
    EditItem,
    Refresh,
    NextPage,
    PrevPage,
    CycleRowsPerPage,
    CycleTimeRange,
    ClearFilters,
    Input(char),
    Backspace,
}

/// Whether printable keys edit text or trigger commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Text,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => return Some(Action::Confirm),
        KeyCode::Esc => return Some(Action::Cancel),
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrev),
        KeyCode::Up => return Some(Action::MoveUp),
        KeyCode::Down => return Some(Action::MoveDown),
        KeyCode::Left => return Some(Action::MoveLeft),
        KeyCode::Right => return Some(Action::MoveRight),
        KeyCode::Backspace if mode == InputMode::Text => return Some(Action::Backspace),
        _ => {}
    }

    if mode == InputMode::Text {
        return match code {
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('m') => Some(Action::OpenMenu),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char(']') => Some(Action::NextPage),
        KeyCode::Char('[') => Some(Action::PrevPage),
        KeyCode::Char('+') => Some(Action::CycleRowsPerPage),
        KeyCode::Char('t') => Some(Action::CycleTimeRange),
        KeyCode::Char('c') => Some(Action::ClearFilters),
        KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Backspace => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_commands() {
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Normal), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char(']')), InputMode::Normal), Some(Action::NextPage));
        assert_eq!(
            map_key(key(KeyCode::Char('+')), InputMode::Normal),
            Some(Action::CycleRowsPerPage)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL), InputMode::Normal),
            Some(Action::Refresh)
        );
    }

    #[test]
    fn test_text_mode_captures_printable_keys() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), InputMode::Text),
            Some(Action::Input('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), InputMode::Text),
            Some(Action::Backspace)
        );
        assert_eq!(map_key(key(KeyCode::Tab), InputMode::Text), Some(Action::FocusNext));
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Text), Some(Action::Cancel));
    }
}
