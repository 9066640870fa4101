//! Mood statistics.

use std::collections::BTreeMap;

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use super::entry::{MoodEntry, MoodLevel};

/// Aggregate view over a set of mood entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStats {
    /// Entries per level, every level present
    pub counts: BTreeMap<MoodLevel, usize>,
    /// Number of entries
    pub total_entries: usize,
    /// Mean level value, absent without entries
    pub average: Option<f64>,
    /// Consecutive logged days ending today or yesterday
    pub streak: u32,
    /// Latest mood logged today
    pub today: Option<MoodLevel>,
}

impl MoodStats {
    /// Compute statistics relative to the local current day.
    #[must_use]
    pub fn compute(entries: &[MoodEntry]) -> Self {
        Self::compute_on(entries, Local::now().date_naive())
    }

    /// Compute statistics relative to `today`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_on(entries: &[MoodEntry], today: NaiveDate) -> Self {
        let mut counts: BTreeMap<MoodLevel, usize> =
            MoodLevel::ALL.iter().map(|level| (*level, 0)).collect();
        for entry in entries {
            *counts.entry(entry.mood).or_default() += 1;
        }

        let total_entries = entries.len();
        let average = (total_entries > 0).then(|| {
            let sum: u64 = entries.iter().map(|e| u64::from(e.mood.value())).sum();
            sum as f64 / total_entries as f64
        });

        let today_mood = entries
            .iter()
            .filter(|e| e.local_date() == today)
            .max_by_key(|e| e.recorded_at)
            .map(|e| e.mood);

        Self {
            counts,
            total_entries,
            average,
            streak: logging_streak(entries, today),
            today: today_mood,
        }
    }
}

/// Count consecutive logged days backwards from today.
///
/// Several entries on one day count once. A day without an entry breaks the
/// streak, except that the streak may start yesterday when nothing has been
/// logged yet today.
fn logging_streak(entries: &[MoodEntry], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = entries.iter().map(MoodEntry::local_date).collect();
    dates.sort_unstable();
    dates.dedup();

    let mut check_date = today;
    if dates.binary_search(&today).is_err() {
        check_date = today - Duration::days(1);
    }

    let mut streak = 0;
    while dates.binary_search(&check_date).is_ok() {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}
