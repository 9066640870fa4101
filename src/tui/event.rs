//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::error::MindwellError;
use crate::features::progress::ProgressSink;
use crate::features::timer::Clock;
use crate::tui::app::App;

/// Longest wait for a key before the timer is serviced again.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

const HELP: &str = "j/k:nav | Enter:start | space:play/pause | r:reset | s:stop | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start the selected entry.
    Start,
    /// Play or pause.
    Toggle,
    /// Rewind the active session.
    Reset,
    /// End the active session.
    Stop,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<C: Clock, S: ProgressSink>(
    app: &mut App<'_, C, S>,
) -> Result<Option<Action>, MindwellError> {
    if event::poll(POLL_TIMEOUT)
        .map_err(|e| MindwellError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| MindwellError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map one key press to an action, updating selection in place.
pub fn handle_key<C: Clock, S: ProgressSink>(
    app: &mut App<'_, C, S>,
    key: KeyEvent,
) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if key.code != KeyCode::Char('g') {
        app.cancel_pending();
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Char('g') => {
            app.handle_g();
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            None
        }
        KeyCode::Home => {
            app.select_first();
            None
        }

        // Player
        KeyCode::Enter => Some(Action::Start),
        KeyCode::Char(' ' | 'p') => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Stop),

        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
            None
        }

        _ => None,
    }
}
