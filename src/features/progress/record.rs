//! Aggregate practice progress and the completion contract.

use serde::{Deserialize, Serialize};

use crate::error::MindwellError;

/// Increment applied to a [`ProgressRecord`] when an exercise completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressDelta {
    /// Sessions added
    pub sessions: u32,
    /// Whole minutes added
    pub minutes: u32,
    /// Streak days added
    pub streak: u32,
    /// Weekly progress added
    pub weekly: u32,
}

impl ProgressDelta {
    /// Delta for one completed exercise of `duration_secs` seconds.
    ///
    /// Partial minutes are dropped.
    #[must_use]
    pub const fn for_exercise(duration_secs: u32) -> Self {
        Self {
            sessions: 1,
            minutes: duration_secs / 60,
            streak: 1,
            weekly: 1,
        }
    }
}

/// A finished exercise run, as reported by the timer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Exercise title at the time of completion
    pub title: String,
    /// Exercise length in seconds
    pub duration_secs: u32,
    /// Change to apply to the progress record
    pub delta: ProgressDelta,
}

/// Aggregate practice statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Completed sessions
    pub total_sessions: u64,
    /// Minutes practiced
    pub total_minutes: u64,
    /// Current streak
    pub current_streak: u32,
    /// Sessions counted toward this week's goal
    pub weekly_progress: u32,
}

impl ProgressRecord {
    /// Add a delta to the record.
    pub fn apply(&mut self, delta: &ProgressDelta) {
        self.total_sessions += u64::from(delta.sessions);
        self.total_minutes += u64::from(delta.minutes);
        self.current_streak = self.current_streak.saturating_add(delta.streak);
        self.weekly_progress = self.weekly_progress.saturating_add(delta.weekly);
    }

    /// Weekly progress as a percentage of `goal`, capped at 100.
    #[must_use]
    pub fn weekly_goal_percent(&self, goal: u32) -> f64 {
        if goal == 0 {
            return 100.0;
        }
        (f64::from(self.weekly_progress) / f64::from(goal) * 100.0).min(100.0)
    }
}

/// Consumer of exercise completions.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink {
    /// Record one completed exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion cannot be stored.
    fn record_completion(&mut self, completion: &Completion) -> Result<(), MindwellError>;
}

impl ProgressSink for ProgressRecord {
    fn record_completion(&mut self, completion: &Completion) -> Result<(), MindwellError> {
        self.apply(&completion.delta);
        Ok(())
    }
}
