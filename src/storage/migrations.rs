//! Database migrations for mindwell.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use log::info;
use rusqlite::Connection;

use crate::error::MindwellError;

/// Current schema version.
const CURRENT_VERSION: i32 = 2;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, MindwellError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| MindwellError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), MindwellError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| MindwellError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), MindwellError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
        info!("migrated database to schema v{version}");
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), MindwellError> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        _ => Err(MindwellError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: practice progress.
///
/// Creates tables for:
/// - `progress`: the single aggregate progress row
/// - `practice_sessions`: completed exercise history
fn migrate_v1(conn: &Connection) -> Result<(), MindwellError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS progress (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            total_sessions INTEGER NOT NULL DEFAULT 0,
            total_minutes INTEGER NOT NULL DEFAULT 0,
            current_streak INTEGER NOT NULL DEFAULT 0,
            weekly_progress INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT
        );

        INSERT OR IGNORE INTO progress (id) VALUES (1);

        CREATE TABLE IF NOT EXISTS practice_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            exercise_id TEXT NOT NULL,
            title TEXT NOT NULL,
            duration_secs INTEGER NOT NULL,
            minutes INTEGER NOT NULL,
            completed_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_practice_sessions_completed
        ON practice_sessions(completed_at);

        CREATE INDEX IF NOT EXISTS idx_practice_sessions_exercise
        ON practice_sessions(exercise_id);
        ",
    )
    .map_err(|e| MindwellError::Database(format!("Migration v1 failed: {e}")))
}

/// Migration v2: mood journal.
fn migrate_v2(conn: &Connection) -> Result<(), MindwellError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS mood_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            mood INTEGER NOT NULL CHECK (mood BETWEEN 1 AND 5),
            note TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '',
            recorded_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mood_entries_recorded
        ON mood_entries(recorded_at);
        ",
    )
    .map_err(|e| MindwellError::Database(format!("Migration v2 failed: {e}")))
}
