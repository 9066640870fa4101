//! Guided exercises: fixed-duration sessions with a single completion point.

use serde::{Deserialize, Serialize};

use crate::error::MindwellError;

/// Kind of guided exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    /// Breathing technique practice
    Breathing,
    /// Mindfulness meditation
    Mindfulness,
    /// Progressive body scan
    BodyScan,
    /// Guided imagery
    Visualization,
}

impl ExerciseKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 4] = [
        Self::Breathing,
        Self::Mindfulness,
        Self::BodyScan,
        Self::Visualization,
    ];

    /// Parse a kind from its tag or a short alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breathing" | "breath" | "b" => Some(Self::Breathing),
            "mindfulness" | "mindful" | "m" => Some(Self::Mindfulness),
            "body-scan" | "bodyscan" | "body" => Some(Self::BodyScan),
            "visualization" | "visual" | "v" => Some(Self::Visualization),
            _ => None,
        }
    }

    /// Stable tag used in files and JSON.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Breathing => "breathing",
            Self::Mindfulness => "mindfulness",
            Self::BodyScan => "body-scan",
            Self::Visualization => "visualization",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Difficulty of a guided exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// A fixed-duration guided exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Catalog identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Total duration in seconds
    pub duration_secs: u32,
    /// Kind tag
    pub kind: ExerciseKind,
    /// Difficulty tag
    pub difficulty: Difficulty,
    /// Free-form category
    #[serde(default)]
    pub category: String,
    /// Marked as a favorite
    #[serde(default)]
    pub favorite: bool,
    /// Has been completed at least once
    #[serde(default)]
    pub completed: bool,
}

impl Exercise {
    /// Create an exercise with empty description and category.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration_secs: u32,
        kind: ExerciseKind,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            duration_secs,
            kind,
            difficulty,
            category: String::new(),
            favorite: false,
            completed: false,
        }
    }

    /// Reject exercises that could never complete.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::InvalidDuration` when the duration is zero.
    pub fn validate(&self) -> Result<(), MindwellError> {
        if self.duration_secs == 0 {
            return Err(MindwellError::InvalidDuration(format!(
                "exercise '{}' has a zero duration",
                self.id
            )));
        }
        Ok(())
    }

    /// Whole minutes credited on completion.
    #[must_use]
    pub const fn credited_minutes(&self) -> u32 {
        self.duration_secs / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(ExerciseKind::parse("breathing"), Some(ExerciseKind::Breathing));
        assert_eq!(ExerciseKind::parse("Body-Scan"), Some(ExerciseKind::BodyScan));
        assert_eq!(ExerciseKind::parse("visual"), Some(ExerciseKind::Visualization));
        assert_eq!(ExerciseKind::parse("yoga"), None);
    }

    #[test]
    fn test_kind_serde_tag() {
        let json = serde_json::to_string(&ExerciseKind::BodyScan).unwrap();
        assert_eq!(json, "\"body-scan\"");
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let ex = Exercise::new("x", "Empty", 0, ExerciseKind::Mindfulness, Difficulty::Beginner);
        assert!(matches!(ex.validate(), Err(MindwellError::InvalidDuration(_))));
    }

    #[test]
    fn test_credited_minutes_floor() {
        let ex = Exercise::new("x", "X", 179, ExerciseKind::Mindfulness, Difficulty::Beginner);
        assert_eq!(ex.credited_minutes(), 2);
    }
}
