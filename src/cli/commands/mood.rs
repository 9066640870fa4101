//! Mood journal command implementation.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::{MoodCommands, OutputFormat};
use crate::error::MindwellError;
use crate::features::mood::{MoodEntry, MoodLevel, MoodStats, MoodStorage};
use crate::output::{format_mood, format_mood_stats, format_moods, to_json};

/// Execute mood subcommands.
///
/// # Errors
///
/// Returns an error for an unknown mood level, an unconfirmed clear, or a
/// database failure.
pub fn mood(ctx: &Context, cmd: MoodCommands) -> Result<String, MindwellError> {
    let storage = MoodStorage::with_database(ctx.database()?);

    match cmd {
        MoodCommands::Log { level, note, tags } => {
            let mood = MoodLevel::parse(&level).ok_or_else(|| {
                MindwellError::Parse(format!(
                    "Unknown mood '{level}' (use 1-5 or very-low, low, neutral, good, very-good)"
                ))
            })?;
            let mut entry = MoodEntry::new(
                mood,
                note.unwrap_or_default(),
                tags.as_deref().unwrap_or_default(),
            );
            storage.add(&mut entry)?;
            format_mood(&entry, ctx.format)
        }

        MoodCommands::List { limit } => format_moods(&storage.recent(limit)?, ctx.format),

        MoodCommands::Stats => {
            let stats = MoodStats::compute(&storage.all()?);
            format_mood_stats(&stats, ctx.format)
        }

        MoodCommands::Clear { force } => {
            if !force {
                return Err(MindwellError::Config(
                    "This deletes every mood entry. Re-run with --force to confirm.".to_string(),
                ));
            }
            let removed = storage.clear()?;
            match ctx.format {
                OutputFormat::Json => to_json(&json!({ "removed": removed })),
                OutputFormat::Pretty => Ok(format!("Removed {removed} mood entries")
                    .green()
                    .to_string()),
            }
        }
    }
}
