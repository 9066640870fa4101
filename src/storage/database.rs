//! `SQLite` database connection.
//!
//! The database is stored at `~/.mindwell/mindwell.db` and contains tables for:
//! - The aggregate progress record
//! - Completed practice sessions
//! - Mood entries

use log::debug;
use rusqlite::Connection;

use crate::config::Paths;
use crate::error::MindwellError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database under the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the database
    /// cannot be opened, or migrations fail.
    pub fn open_in(paths: &Paths) -> Result<Self, MindwellError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, MindwellError> {
        let conn = Connection::open(path).map_err(|e| {
            MindwellError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        debug!("opened database at {}", path.display());

        Self::prepare(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, MindwellError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            MindwellError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self, MindwellError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| MindwellError::Database(format!("Failed to enable foreign keys: {e}")))?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, MindwellError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    ///
    /// This is primarily for use by feature modules that need direct access.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get a mutable reference to the connection, for transactions.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
