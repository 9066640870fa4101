//! Progress command implementation.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::{OutputFormat, ProgressCommands};
use crate::error::MindwellError;
use crate::features::progress::ProgressStore;
use crate::output::{format_history, format_progress, to_json};

/// Execute progress subcommands.
///
/// # Errors
///
/// Returns an error if the database fails or a reset is not confirmed.
pub fn progress(ctx: &Context, cmd: Option<ProgressCommands>) -> Result<String, MindwellError> {
    let mut store = ProgressStore::with_database(ctx.database()?);

    match cmd.unwrap_or(ProgressCommands::Show) {
        ProgressCommands::Show => format_progress(
            &store.record()?,
            ctx.config.practice.weekly_goal_sessions,
            ctx.format,
        ),
        ProgressCommands::History { limit } => format_history(&store.recent(limit)?, ctx.format),
        ProgressCommands::Reset { force } => {
            if !force {
                return Err(MindwellError::Config(
                    "This erases all progress and history. Re-run with --force to confirm."
                        .to_string(),
                ));
            }
            store.reset()?;
            match ctx.format {
                OutputFormat::Json => to_json(&json!({ "reset": true })),
                OutputFormat::Pretty => Ok("Progress reset".green().to_string()),
            }
        }
    }
}
