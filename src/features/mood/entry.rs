//! Mood entries.

use chrono::{DateTime, Local, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HASHTAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)#([\w-]+)").unwrap_or_else(|e| panic!("Invalid hashtag regex: {e}"))
});

/// How the user feels, from 1 (very low) to 5 (very good).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodLevel {
    VeryLow,
    Low,
    Neutral,
    Good,
    VeryGood,
}

impl MoodLevel {
    /// All levels, lowest first.
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Neutral,
        Self::Good,
        Self::VeryGood,
    ];

    /// Numeric value, 1 to 5.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::VeryLow => 1,
            Self::Low => 2,
            Self::Neutral => 3,
            Self::Good => 4,
            Self::VeryGood => 5,
        }
    }

    /// Level for a numeric value.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::VeryLow),
            2 => Some(Self::Low),
            3 => Some(Self::Neutral),
            4 => Some(Self::Good),
            5 => Some(Self::VeryGood),
            _ => None,
        }
    }

    /// Parse a level from a number or a name like `good` or `very-low`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        if let Ok(n) = s.parse::<u8>() {
            return Self::from_value(n);
        }
        match s.as_str() {
            "verylow" | "awful" => Some(Self::VeryLow),
            "low" | "bad" => Some(Self::Low),
            "neutral" | "ok" | "okay" => Some(Self::Neutral),
            "good" => Some(Self::Good),
            "verygood" | "great" => Some(Self::VeryGood),
            _ => None,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Neutral => "Neutral",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
        }
    }

    /// Emoji shown next to the label.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::VeryLow => "😢",
            Self::Low => "😔",
            Self::Neutral => "😐",
            Self::Good => "😊",
            Self::VeryGood => "😄",
        }
    }
}

impl std::fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Database id, set once stored
    pub id: Option<i64>,
    /// Mood level
    pub mood: MoodLevel,
    /// Free-form note
    pub note: String,
    /// Lowercase tags
    pub tags: Vec<String>,
    /// When the mood was logged
    pub recorded_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Create an entry logged now.
    ///
    /// Tags come from the comma-separated list plus any `#hashtags` in the
    /// note.
    #[must_use]
    pub fn new(mood: MoodLevel, note: impl Into<String>, tags: &str) -> Self {
        let note = note.into();
        Self {
            id: None,
            mood,
            tags: parse_tags(tags, &note),
            note,
            recorded_at: Utc::now(),
        }
    }

    /// Set the timestamp.
    #[must_use]
    pub const fn at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// Calendar day of the entry in local time.
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.recorded_at.with_timezone(&Local).date_naive()
    }
}

/// Collect tags from a comma list and `#hashtags` in a note.
///
/// Tags are trimmed and lowercased; empties and duplicates are dropped and
/// first-seen order is kept.
#[must_use]
pub fn parse_tags(list: &str, note: &str) -> Vec<String> {
    let listed = list.split(',').map(str::to_string);
    let hashtags = HASHTAG
        .captures_iter(note)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()));

    let mut tags: Vec<String> = Vec::new();
    for tag in listed.chain(hashtags) {
        let tag = tag.trim().trim_start_matches('#').to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_values_round_trip() {
        for level in MoodLevel::ALL {
            assert_eq!(MoodLevel::from_value(level.value()), Some(level));
        }
        assert_eq!(MoodLevel::from_value(0), None);
        assert_eq!(MoodLevel::from_value(6), None);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(MoodLevel::parse("very-good"), Some(MoodLevel::VeryGood));
        assert_eq!(MoodLevel::parse("VERY_LOW"), Some(MoodLevel::VeryLow));
        assert_eq!(MoodLevel::parse("Neutral"), Some(MoodLevel::Neutral));
        assert_eq!(MoodLevel::parse("4"), Some(MoodLevel::Good));
        assert_eq!(MoodLevel::parse("9"), None);
        assert_eq!(MoodLevel::parse("meh"), None);
    }

    #[test]
    fn test_level_serde_name() {
        let json = serde_json::to_string(&MoodLevel::VeryGood).unwrap();
        assert_eq!(json, "\"VERY_GOOD\"");
    }

    #[test]
    fn test_parse_tags_list() {
        assert_eq!(
            parse_tags(" Productive, college,, positive ", ""),
            vec!["productive", "college", "positive"]
        );
        assert!(parse_tags("", "").is_empty());
    }

    #[test]
    fn test_parse_tags_hashtags_merged() {
        let tags = parse_tags("friends", "Great time with #friends and #board-games!");
        assert_eq!(tags, vec!["friends", "board-games"]);
    }

    #[test]
    fn test_hashtag_needs_word_boundary() {
        assert!(parse_tags("", "issue#42").is_empty());
    }

    #[test]
    fn test_new_entry() {
        let entry = MoodEntry::new(MoodLevel::Good, "Productive day #work", "college");
        assert_eq!(entry.id, None);
        assert_eq!(entry.tags, vec!["college", "work"]);
    }
}
