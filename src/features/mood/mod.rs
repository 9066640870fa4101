//! Mood journal.
//!
//! Provides daily mood logging:
//! - Five-level mood entries with notes and tags
//! - Aggregate statistics and a logging streak
//! - Persistence in the local database

pub mod entry;
pub mod stats;
pub mod storage;

pub use entry::{parse_tags, MoodEntry, MoodLevel};
pub use stats::MoodStats;
pub use storage::MoodStorage;
