use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result;

use crate::state::AppState;

/// Event handler for the terminal widget
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal
    pub fn read() -> Result<Option<Event>> {
        match crossterm::event::poll(std::time::Duration::from_millis(50)) {
            Ok(true) => Ok(Some(crossterm::event::read()?)),
            _ => Ok(None),
        }
    }

    /// Apply editing keys to the composer and map the rest to actions
    pub fn handle_key_event(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        match event.code {
            KeyCode::Esc => return Some(KeyAction::Exit),
            KeyCode::Char('c') if ctrl => return Some(KeyAction::Exit),
            KeyCode::Char('o') if ctrl => {
                state.toggle_open();
                return Some(KeyAction::ToggleOpen);
            }
            KeyCode::Enter => {
                let message = state.input.take();
                return Some(KeyAction::SendMessage { message });
            }
            KeyCode::Up => state.input.navigate_up(),
            KeyCode::Down => state.input.navigate_down(),
            KeyCode::Char(c) if !ctrl => {
                if state.input.is_navigating_history() {
                    state.input.reset_history_navigation();
                }
                state.input.insert_char(c);
            }
            KeyCode::Backspace => state.input.backspace(),
            KeyCode::Delete => state.input.delete(),
            KeyCode::Left => state.input.move_left(),
            KeyCode::Right => state.input.move_right(),
            KeyCode::Home => state.input.move_home(),
            KeyCode::End => state.input.move_end(),
            _ => (),
        }
        state.clear_notice();
        None
    }
}

/// Actions the event loop has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the composer contents. May be blank; the controller ignores those.
    SendMessage { message: String },
    /// Message panel was expanded or collapsed
    ToggleOpen,
    /// Leave the widget
    Exit,
}
