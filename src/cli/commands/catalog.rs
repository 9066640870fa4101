//! Catalog command implementation.

use super::Context;
use crate::error::MindwellError;
use crate::features::progress::ProgressStore;
use crate::features::timer::{Exercise, ExerciseKind};
use crate::output::format_catalog;

/// List exercises and breathing patterns, optionally filtered by kind.
///
/// # Errors
///
/// Returns `MindwellError::Parse` for an unknown kind, or an error if the
/// catalog or history cannot be loaded.
pub fn catalog(ctx: &Context, kind: Option<&str>) -> Result<String, MindwellError> {
    let store = ProgressStore::with_database(ctx.database()?);
    let catalog = ctx.catalog(&store)?;

    let exercises: Vec<&Exercise> = match kind {
        Some(kind) => {
            let kind = ExerciseKind::parse(kind).ok_or_else(|| {
                let known: Vec<&str> = ExerciseKind::ALL.iter().map(ExerciseKind::tag).collect();
                MindwellError::Parse(format!(
                    "Unknown exercise kind '{kind}' (expected one of: {})",
                    known.join(", ")
                ))
            })?;
            catalog.exercises_of_kind(kind)
        }
        None => catalog.exercises.iter().collect(),
    };

    format_catalog(
        &exercises,
        &catalog.patterns,
        &catalog.completion_summary(),
        ctx.format,
    )
}
