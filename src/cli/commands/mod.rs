//! Command implementations for mindwell.
//!
//! Each command returns the text to print; `main` does the printing.

mod catalog;
mod config;
mod mood;
mod progress;
mod session;
mod slots;

pub use catalog::catalog;
pub use config::config;
pub use mood::mood;
pub use progress::progress;
pub use session::{breathe, browse, drive, start, StopWhen, DEFAULT_HEADLESS_CYCLES};
pub use slots::slots;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::MindwellError;
use crate::features::catalog::Catalog;
use crate::features::progress::ProgressStore;
use crate::storage::Database;

/// Everything a command needs from the environment.
pub struct Context {
    /// Data directory layout
    pub paths: Paths,
    /// Effective configuration
    pub config: Config,
    /// Requested output format
    pub format: OutputFormat,
}

impl Context {
    /// Bundle resolved paths and config with the output format.
    #[must_use]
    pub const fn new(paths: Paths, config: Config, format: OutputFormat) -> Self {
        Self {
            paths,
            config,
            format,
        }
    }

    /// Open the database in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn database(&self) -> Result<Database, MindwellError> {
        Database::open_in(&self.paths)
    }

    /// Load the catalog with completion flags restored from history.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file is invalid or the history
    /// cannot be read.
    pub fn catalog(&self, store: &ProgressStore) -> Result<Catalog, MindwellError> {
        let mut catalog = Catalog::load(&self.paths)?;
        let completed = store.completed_exercise_ids()?;
        catalog.apply_history(completed.iter().map(String::as_str));
        Ok(catalog)
    }
}
