//! Configuration command implementation.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::MindwellError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be serialized or written, or if
/// `init` would overwrite an existing file without `--force`.
pub fn config(ctx: &Context, cmd: Option<ConfigCommands>) -> Result<String, MindwellError> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => match ctx.format {
            OutputFormat::Json => to_json(&ctx.config),
            OutputFormat::Pretty => Ok(serde_yaml::to_string(&ctx.config)?),
        },

        ConfigCommands::Path => {
            let paths = &ctx.paths;
            match ctx.format {
                OutputFormat::Json => to_json(&json!({
                    "root": paths.root,
                    "config": paths.config_file,
                    "database": paths.database,
                    "catalog": paths.catalog,
                    "log": paths.log_file,
                })),
                OutputFormat::Pretty => Ok([
                    ("Data", &paths.root),
                    ("Config", &paths.config_file),
                    ("Database", &paths.database),
                    ("Catalog", &paths.catalog),
                    ("Log", &paths.log_file),
                ]
                .iter()
                .map(|(label, path)| format!("{:<10} {}", label.dimmed(), path.display()))
                .collect::<Vec<_>>()
                .join("\n")),
            }
        }

        ConfigCommands::Init { force } => {
            let path = &ctx.paths.config_file;
            if path.exists() && !force {
                return Err(MindwellError::Config(format!(
                    "{} already exists. Re-run with --force to overwrite.",
                    path.display()
                )));
            }
            ctx.paths.ensure_dirs()?;
            Config::default().save_to_path(path)?;
            match ctx.format {
                OutputFormat::Json => to_json(&json!({ "written": path })),
                OutputFormat::Pretty => {
                    Ok(format!("Wrote {}", path.display()).green().to_string())
                }
            }
        }
    }
}
