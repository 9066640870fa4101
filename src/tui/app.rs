//! Application state for the TUI.

use crate::error::MindwellError;
use crate::features::progress::ProgressSink;
use crate::features::timer::{
    Clock, RunOutcome, SessionRunner, SessionStatus, TimerEvent, TimerSnapshot,
};

/// A row in the catalog list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Exercise id
    Exercise(String),
    /// Breathing pattern id
    Pattern(String),
}

/// Application state.
pub struct App<'a, C: Clock, S: ProgressSink> {
    runner: &'a mut SessionRunner<C, S>,
    /// Catalog rows, exercises first.
    pub entries: Vec<Entry>,
    /// Currently selected index.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Stop breathing sessions at this many cycles.
    pub cycle_limit: Option<u32>,
    /// Completions and cycles seen so far.
    pub outcome: RunOutcome,
    /// Pending 'g' key for 'gg' command.
    pub pending_g: bool,
}

impl<'a, C: Clock, S: ProgressSink> App<'a, C, S> {
    /// Create a new app around a runner, selecting the active session's row.
    pub fn new(runner: &'a mut SessionRunner<C, S>, cycle_limit: Option<u32>) -> Self {
        let catalog = runner.catalog();
        let entries: Vec<Entry> = catalog
            .exercises
            .iter()
            .map(|e| Entry::Exercise(e.id.clone()))
            .chain(catalog.patterns.iter().map(|p| Entry::Pattern(p.id.clone())))
            .collect();

        let selected = runner
            .snapshot()
            .ok()
            .and_then(|snap| {
                entries.iter().position(|entry| match entry {
                    Entry::Exercise(id) | Entry::Pattern(id) => *id == snap.target_id,
                })
            })
            .unwrap_or(0);

        Self {
            runner,
            entries,
            selected,
            status: Some("Press ? for help".to_string()),
            cycle_limit,
            outcome: RunOutcome::default(),
            pending_g: false,
        }
    }

    /// The runner behind the player.
    pub fn runner(&self) -> &SessionRunner<C, S> {
        &*self.runner
    }

    /// Display state of the active session, if any.
    pub fn snapshot(&self) -> Option<TimerSnapshot> {
        self.runner.snapshot().ok()
    }

    /// Get the currently selected row.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_g = false;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.entries.is_empty() && self.selected < self.entries.len() - 1 {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    /// Jump to first row.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    /// Jump to last row.
    pub fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self.entries.len() - 1;
        }
        self.pending_g = false;
    }

    /// Start the selected exercise or pattern, replacing any active session.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be started.
    pub fn start_selected(&mut self) -> Result<(), MindwellError> {
        match self.selected_entry().cloned() {
            Some(Entry::Exercise(id)) => self.runner.start_exercise(&id)?,
            Some(Entry::Pattern(id)) => self.runner.start_pattern(&id)?,
            None => return Ok(()),
        }
        if let Some(snap) = self.snapshot() {
            self.status = Some(format!("Started: {}", snap.title));
        }
        Ok(())
    }

    /// Play or pause the active session.
    pub fn toggle(&mut self) {
        let running = self.runner.toggle();
        self.status = match self.snapshot() {
            Some(snap) if running => Some(format!("Playing: {}", snap.title)),
            Some(snap) if snap.status == SessionStatus::Completed => {
                Some("Already completed. Press r to go again".to_string())
            }
            Some(snap) => Some(format!("Paused: {}", snap.title)),
            None => Some("Nothing to play. Press Enter to start".to_string()),
        };
    }

    /// Rewind the active session.
    pub fn reset(&mut self) {
        self.runner.reset();
        if let Some(snap) = self.snapshot() {
            self.status = Some(format!("Reset: {}", snap.title));
        }
    }

    /// End the active session without recording anything.
    pub fn stop(&mut self) {
        if let Some(snap) = self.snapshot() {
            self.status = Some(format!("Stopped: {}", snap.title));
        }
        self.runner.stop();
    }

    /// Apply due ticks and react to what happened.
    ///
    /// # Errors
    ///
    /// Returns an error if a completion cannot be recorded.
    pub fn tick(&mut self) -> Result<(), MindwellError> {
        let events = self.runner.pump()?;
        self.outcome.absorb(&events);

        for event in &events {
            match event {
                TimerEvent::Completed(completion) => {
                    self.status = Some(format!(
                        "Completed: {} (+{} min)",
                        completion.title, completion.delta.minutes
                    ));
                }
                TimerEvent::PhaseChanged { cycles, .. } => {
                    if self.cycle_limit.is_some_and(|limit| *cycles >= limit) {
                        self.runner.stop();
                        self.status = Some(format!("Finished after {cycles} cycle(s)"));
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle 'g' key for 'gg' command.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            self.select_first();
        } else {
            self.pending_g = true;
            self.status = Some("g-".to_string());
        }
    }

    /// Cancel pending 'g' command.
    pub fn cancel_pending(&mut self) {
        self.pending_g = false;
    }
}
