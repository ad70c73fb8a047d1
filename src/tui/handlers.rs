// File: src/tui/handlers.rs
use crate::model::LoadingState;
use crate::tui::action::{Action, Screen};
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_state_change(state: &mut AppState, loading: LoadingState) {
    state.set_loading(loading);
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Tab => {
            state.toggle_screen();
            return None;
        }
        KeyCode::Down => {
            state.next();
            return None;
        }
        KeyCode::Up => {
            state.previous();
            return None;
        }
        _ => {}
    }

    match state.screen {
        Screen::Search => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('s') if ctrl => {
                state.save_selected();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                state.enter_char(c);
                Some(Action::QueryChanged(state.input_buffer.clone()))
            }
            KeyCode::Backspace => {
                state.delete_char();
                Some(Action::QueryChanged(state.input_buffer.clone()))
            }
            KeyCode::Left => {
                state.move_cursor_left();
                None
            }
            KeyCode::Right => {
                state.move_cursor_right();
                None
            }
            _ => None,
        },

        Screen::Home => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') => {
                state.next();
                None
            }
            KeyCode::Char('k') => {
                state.previous();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                state.remove_selected();
                None
            }
            _ => None,
        },
    }
}
