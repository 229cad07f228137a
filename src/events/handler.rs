use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::types::{AppEvent, EventResult};
use crate::app::App;

/// Handle an application event
pub fn handle_event(app: &mut App, event: AppEvent) -> EventResult {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Tick => {
            app.refresh();
            EventResult::Continue
        }
        AppEvent::Resize(_, _) => {
            // UI will handle resize automatically
            EventResult::Continue
        }
    }
}

/// The operator surface is two commands: start monitoring, quit monitoring.
/// Quit stops the session (the exit report is printed after terminal restore).
pub fn handle_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EventResult::Exit,
        KeyCode::Char('q') => EventResult::Exit,
        KeyCode::Char('s') => {
            app.start_monitoring();
            EventResult::Continue
        }
        _ => EventResult::Continue,
    }
}
