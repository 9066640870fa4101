//! Error types for mindwell.

use thiserror::Error;

/// Errors produced by the mindwell library.
#[derive(Debug, Error)]
pub enum MindwellError {
    /// A zero-length exercise or an all-zero breathing pattern.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// An operation needed an active timer session and there was none.
    #[error("No active session")]
    NoActiveSession,

    /// A catalog entry, record or file could not be found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration or environment problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `SQLite` failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Input could not be parsed or serialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for MindwellError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for MindwellError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for MindwellError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
