//! Progress storage.
//!
//! Persists the aggregate record and the completed session history to the
//! local database.

use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Row};
use serde::Serialize;

use super::record::{Completion, ProgressRecord, ProgressSink};
use crate::error::MindwellError;
use crate::storage::Database;

/// One completed exercise run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeSession {
    /// Row id
    pub id: i64,
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Exercise title at completion time
    pub title: String,
    /// Exercise length in seconds
    pub duration_secs: u32,
    /// Minutes credited
    pub minutes: u32,
    /// When the run completed
    pub completed_at: DateTime<Utc>,
}

/// SQLite-backed [`ProgressSink`].
pub struct ProgressStore {
    db: Database,
}

impl ProgressStore {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Current aggregate record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn record(&self) -> Result<ProgressRecord, MindwellError> {
        self.db
            .connection()
            .query_row(
                r"SELECT total_sessions, total_minutes, current_streak, weekly_progress
                  FROM progress WHERE id = 1",
                [],
                |row| {
                    Ok(ProgressRecord {
                        total_sessions: row.get(0)?,
                        total_minutes: row.get(1)?,
                        current_streak: row.get(2)?,
                        weekly_progress: row.get(3)?,
                    })
                },
            )
            .map_err(|e| MindwellError::Database(format!("Failed to read progress: {e}")))
    }

    /// Record a completion with an explicit timestamp.
    ///
    /// The record update and history insert happen in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    pub fn record_completion_at(
        &mut self,
        completion: &Completion,
        at: DateTime<Utc>,
    ) -> Result<(), MindwellError> {
        let delta = completion.delta;
        let tx = self
            .db
            .connection_mut()
            .transaction()
            .map_err(|e| MindwellError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute(
            r"UPDATE progress SET
              total_sessions = total_sessions + ?1,
              total_minutes = total_minutes + ?2,
              current_streak = current_streak + ?3,
              weekly_progress = weekly_progress + ?4,
              updated_at = ?5
              WHERE id = 1",
            params![
                delta.sessions,
                delta.minutes,
                delta.streak,
                delta.weekly,
                at.to_rfc3339()
            ],
        )
        .map_err(|e| MindwellError::Database(format!("Failed to update progress: {e}")))?;

        tx.execute(
            r"INSERT INTO practice_sessions
              (exercise_id, title, duration_secs, minutes, completed_at)
              VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                completion.exercise_id,
                completion.title,
                completion.duration_secs,
                delta.minutes,
                at.to_rfc3339()
            ],
        )
        .map_err(|e| MindwellError::Database(format!("Failed to insert session: {e}")))?;

        tx.commit()
            .map_err(|e| MindwellError::Database(format!("Failed to commit progress: {e}")))?;

        info!(
            "stored completion of '{}' ({} min)",
            completion.exercise_id, delta.minutes
        );
        Ok(())
    }

    /// Most recent completed sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<PracticeSession>, MindwellError> {
        let conn = self.db.connection();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn
            .prepare(
                r"SELECT id, exercise_id, title, duration_secs, minutes, completed_at
                  FROM practice_sessions
                  ORDER BY completed_at DESC, id DESC
                  LIMIT ?1",
            )
            .map_err(|e| MindwellError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([limit], row_to_session)
            .map_err(|e| MindwellError::Database(format!("Failed to query sessions: {e}")))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.map_err(|e| MindwellError::Database(e.to_string()))?);
        }
        Ok(sessions)
    }

    /// Ids of every exercise completed at least once.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn completed_exercise_ids(&self) -> Result<Vec<String>, MindwellError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT DISTINCT exercise_id FROM practice_sessions ORDER BY exercise_id")
            .map_err(|e| MindwellError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| MindwellError::Database(format!("Failed to query exercises: {e}")))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(|e| MindwellError::Database(e.to_string()))?);
        }
        Ok(ids)
    }

    /// Zero the record and drop the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the writes fail.
    pub fn reset(&mut self) -> Result<(), MindwellError> {
        self.db
            .connection()
            .execute_batch(
                r"
                DELETE FROM practice_sessions;
                UPDATE progress SET
                    total_sessions = 0,
                    total_minutes = 0,
                    current_streak = 0,
                    weekly_progress = 0,
                    updated_at = NULL
                WHERE id = 1;
                ",
            )
            .map_err(|e| MindwellError::Database(format!("Failed to reset progress: {e}")))?;
        info!("progress reset");
        Ok(())
    }
}

impl ProgressSink for ProgressStore {
    fn record_completion(&mut self, completion: &Completion) -> Result<(), MindwellError> {
        self.record_completion_at(completion, Utc::now())
    }
}

fn row_to_session(row: &Row<'_>) -> Result<PracticeSession, rusqlite::Error> {
    let completed_at_str: String = row.get(5)?;
    let completed_at = DateTime::parse_from_rfc3339(&completed_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(PracticeSession {
        id: row.get(0)?,
        exercise_id: row.get(1)?,
        title: row.get(2)?,
        duration_secs: row.get(3)?,
        minutes: row.get(4)?,
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::progress::ProgressDelta;
    use chrono::TimeZone;

    fn create_test_store() -> ProgressStore {
        ProgressStore::with_database(Database::open_in_memory().unwrap())
    }

    fn completion(id: &str, secs: u32) -> Completion {
        Completion {
            exercise_id: id.to_string(),
            title: format!("Exercise {id}"),
            duration_secs: secs,
            delta: ProgressDelta::for_exercise(secs),
        }
    }

    #[test]
    fn test_new_store_is_zeroed() {
        let store = create_test_store();
        assert_eq!(store.record().unwrap(), ProgressRecord::default());
        assert!(store.recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_record_completion_updates_record_and_history() {
        let mut store = create_test_store();
        store.record_completion(&completion("1", 300)).unwrap();
        store.record_completion(&completion("2", 5)).unwrap();

        let record = store.record().unwrap();
        assert_eq!(record.total_sessions, 2);
        assert_eq!(record.total_minutes, 5);
        assert_eq!(record.current_streak, 2);
        assert_eq!(record.weekly_progress, 2);

        assert_eq!(store.recent(10).unwrap().len(), 2);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let mut store = create_test_store();
        for (day, id) in [(1, "1"), (3, "3"), (2, "2")] {
            let at = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
            store.record_completion_at(&completion(id, 600), at).unwrap();
        }

        let recent = store.recent(2).unwrap();
        let ids: Vec<&str> = recent.iter().map(|s| s.exercise_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
        assert_eq!(recent[0].minutes, 10);
        assert_eq!(
            recent[0].completed_at,
            Utc.with_ymd_and_hms(2024, 5, 3, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_completed_exercise_ids_distinct() {
        let mut store = create_test_store();
        store.record_completion(&completion("4", 480)).unwrap();
        store.record_completion(&completion("1", 300)).unwrap();
        store.record_completion(&completion("4", 480)).unwrap();

        assert_eq!(store.completed_exercise_ids().unwrap(), vec!["1", "4"]);
    }

    #[test]
    fn test_reset() {
        let mut store = create_test_store();
        store.record_completion(&completion("1", 300)).unwrap();
        store.reset().unwrap();

        assert_eq!(store.record().unwrap(), ProgressRecord::default());
        assert!(store.completed_exercise_ids().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("mindwell.db");

        {
            let mut store = ProgressStore::with_database(Database::open_at(&path).unwrap());
            store.record_completion(&completion("3", 600)).unwrap();
        }

        let store = ProgressStore::with_database(Database::open_at(&path).unwrap());
        assert_eq!(store.record().unwrap().total_minutes, 10);
    }
}
