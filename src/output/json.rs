//! JSON output formatting for mindwell.

use serde::Serialize;
use serde_json::json;

use crate::error::MindwellError;
use crate::features::appointments::TimeSlot;
use crate::features::catalog::CompletionSummary;
use crate::features::mood::MoodEntry;
use crate::features::progress::{PracticeSession, ProgressRecord};
use crate::features::timer::{BreathingPattern, Exercise};

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, MindwellError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format the catalog as JSON.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_catalog_json(
    exercises: &[&Exercise],
    patterns: &[BreathingPattern],
    summary: &CompletionSummary,
) -> Result<String, MindwellError> {
    let patterns: Vec<_> = patterns
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "label": p.label(),
                "inhale": p.inhale,
                "hold": p.hold,
                "exhale": p.exhale,
                "holdAfterExhale": p.hold_after_exhale,
                "cycleSecs": p.cycle_secs(),
                "description": p.description,
            })
        })
        .collect();

    to_json(&json!({
        "exercises": exercises,
        "patterns": patterns,
        "summary": summary,
    }))
}

/// Format the progress record as JSON.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_progress_json(record: &ProgressRecord, weekly_goal: u32) -> Result<String, MindwellError> {
    to_json(&json!({
        "total_sessions": record.total_sessions,
        "total_minutes": record.total_minutes,
        "current_streak": record.current_streak,
        "weekly_progress": record.weekly_progress,
        "weekly_goal": weekly_goal,
        "weekly_goal_percent": record.weekly_goal_percent(weekly_goal),
    }))
}

/// Format session history as JSON.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_history_json(sessions: &[PracticeSession]) -> Result<String, MindwellError> {
    to_json(&json!({
        "count": sessions.len(),
        "items": sessions,
    }))
}

/// Format mood entries as JSON.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_moods_json(entries: &[MoodEntry]) -> Result<String, MindwellError> {
    to_json(&json!({
        "count": entries.len(),
        "items": entries,
    }))
}

/// Format appointment slots as JSON.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_slots_json(doctor_id: &str, slots: &[&TimeSlot]) -> Result<String, MindwellError> {
    to_json(&json!({
        "doctor_id": doctor_id,
        "count": slots.len(),
        "items": slots,
    }))
}
