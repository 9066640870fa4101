//! Terminal User Interface (TUI) for mindwell.
//!
//! A catalog browser on the left and the session player on the right.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Entry};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::prelude::*;

use crate::error::MindwellError;
use crate::features::progress::ProgressSink;
use crate::features::timer::{Clock, RunOutcome, SessionRunner};

/// Run the TUI until the user quits.
///
/// Whatever session the runner already holds keeps playing. Breathing
/// sessions stop on their own once `cycle_limit` cycles are reached.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or a completion cannot
/// be recorded.
pub fn run<C: Clock, S: ProgressSink>(
    runner: &mut SessionRunner<C, S>,
    cycle_limit: Option<u32>,
) -> Result<RunOutcome, MindwellError> {
    enable_raw_mode()
        .map_err(|e| MindwellError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| MindwellError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| MindwellError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(runner, cycle_limit);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.outcome)
}

fn run_app<B: Backend, C: Clock, S: ProgressSink>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, C, S>,
) -> Result<(), MindwellError> {
    loop {
        app.tick()?;

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| MindwellError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            debug!("tui action {action:?}");
            match action {
                event::Action::Quit => break,
                event::Action::Start => {
                    if let Err(e) = app.start_selected() {
                        app.status = Some(e.to_string());
                    }
                }
                event::Action::Toggle => app.toggle(),
                event::Action::Reset => app.reset(),
                event::Action::Stop => app.stop(),
            }
        }
    }

    Ok(())
}
