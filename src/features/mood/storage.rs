//! Mood entry storage.

use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Row};

use super::entry::{MoodEntry, MoodLevel};
use crate::error::MindwellError;
use crate::storage::Database;

/// Storage for mood entries.
pub struct MoodStorage {
    db: Database,
}

impl MoodStorage {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert an entry and set its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add(&self, entry: &mut MoodEntry) -> Result<(), MindwellError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO mood_entries (mood, note, tags, recorded_at)
              VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.mood.value(),
                entry.note,
                entry.tags.join(","),
                entry.recorded_at.to_rfc3339(),
            ],
        )
        .map_err(|e| MindwellError::Database(format!("Failed to insert mood entry: {e}")))?;

        entry.id = Some(conn.last_insert_rowid());
        info!("logged mood {} ({} tags)", entry.mood.value(), entry.tags.len());
        Ok(())
    }

    /// Most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<MoodEntry>, MindwellError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            r"SELECT id, mood, note, tags, recorded_at
              FROM mood_entries
              ORDER BY recorded_at DESC, id DESC
              LIMIT ?1",
            &[&limit],
        )
    }

    /// Every entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all(&self) -> Result<Vec<MoodEntry>, MindwellError> {
        self.query(
            r"SELECT id, mood, note, tags, recorded_at
              FROM mood_entries
              ORDER BY recorded_at DESC, id DESC",
            &[],
        )
    }

    fn query(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<MoodEntry>, MindwellError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| MindwellError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_entry)
            .map_err(|e| MindwellError::Database(format!("Failed to query moods: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| MindwellError::Database(e.to_string()))?);
        }
        Ok(entries)
    }

    /// Delete every entry, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, MindwellError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM mood_entries", [])
            .map_err(|e| MindwellError::Database(format!("Failed to clear moods: {e}")))?;
        info!("cleared {removed} mood entries");
        Ok(removed)
    }
}

fn row_to_entry(row: &Row<'_>) -> Result<MoodEntry, rusqlite::Error> {
    let value: u8 = row.get(1)?;
    let mood = MoodLevel::from_value(value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Integer,
            format!("mood out of range: {value}").into(),
        )
    })?;

    let tags: String = row.get(3)?;
    let recorded_at: String = row.get(4)?;
    let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(MoodEntry {
        id: Some(row.get(0)?),
        mood,
        note: row.get(2)?,
        tags: tags
            .split(',')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        recorded_at,
    })
}
