use capture_core::{AppViewModel, Msg};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps a key press to a message for the current view. Unbound keys yield `None`.
pub fn map_key(key: KeyEvent, view: &AppViewModel) -> Option<Msg> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Msg::QuitRequested);
    }
    if key.code == KeyCode::Esc {
        return Some(Msg::QuitRequested);
    }

    if !view.is_editable() {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Enter if view.stage.is_terminal() => {
                Some(Msg::QuitRequested)
            }
            _ => None,
        };
    }

    let current = view.field_value(view.focus);
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Some(Msg::FocusNext),
        KeyCode::Enter => Some(Msg::Submitted),
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            Some(Msg::InputChanged {
                field: view.focus,
                value,
            })
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut value = current.to_string();
            value.push(c);
            Some(Msg::InputChanged {
                field: view.focus,
                value,
            })
        }
        _ => None,
    }
}
