//! Practice progress.
//!
//! Aggregate statistics updated only when an exercise completes naturally,
//! plus the history of completed sessions behind them.

pub mod record;
pub mod storage;

pub use record::{Completion, ProgressDelta, ProgressRecord, ProgressSink};
pub use storage::{PracticeSession, ProgressStore};

#[cfg(test)]
pub use record::MockProgressSink;
