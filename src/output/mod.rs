//! Output formatting for mindwell.
//!
//! Every command renders either colored text for the terminal or JSON for
//! scripting.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::MindwellError;
use crate::features::appointments::TimeSlot;
use crate::features::catalog::CompletionSummary;
use crate::features::mood::{MoodEntry, MoodStats};
use crate::features::progress::{PracticeSession, ProgressRecord};
use crate::features::timer::{BreathingPattern, Exercise};

pub use json::*;
pub use pretty::*;

/// Format the catalog based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_catalog(
    exercises: &[&Exercise],
    patterns: &[BreathingPattern],
    summary: &CompletionSummary,
    format: OutputFormat,
) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format_catalog_pretty(exercises, patterns, summary)),
        OutputFormat::Json => format_catalog_json(exercises, patterns, summary),
    }
}

/// Format the progress record based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_progress(
    record: &ProgressRecord,
    weekly_goal: u32,
    format: OutputFormat,
) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format_progress_pretty(record, weekly_goal)),
        OutputFormat::Json => format_progress_json(record, weekly_goal),
    }
}

/// Format completed sessions based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_history(
    sessions: &[PracticeSession],
    format: OutputFormat,
) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(sessions)),
        OutputFormat::Json => format_history_json(sessions),
    }
}

/// Format a newly logged mood based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_mood(entry: &MoodEntry, format: OutputFormat) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format!("Logged {}", format_mood_pretty(entry))),
        OutputFormat::Json => to_json(entry),
    }
}

/// Format mood entries based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_moods(entries: &[MoodEntry], format: OutputFormat) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format_moods_pretty(entries)),
        OutputFormat::Json => format_moods_json(entries),
    }
}

/// Format mood statistics based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_mood_stats(stats: &MoodStats, format: OutputFormat) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format_mood_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format appointment slots based on output format
///
/// # Errors
///
/// Returns `MindwellError::Parse` if JSON serialization fails.
pub fn format_slots(
    doctor_id: &str,
    slots: &[&TimeSlot],
    format: OutputFormat,
) -> Result<String, MindwellError> {
    match format {
        OutputFormat::Pretty => Ok(format_slots_pretty(doctor_id, slots)),
        OutputFormat::Json => format_slots_json(doctor_id, slots),
    }
}
