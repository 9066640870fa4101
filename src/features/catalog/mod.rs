//! The exercise and breathing pattern catalog.
//!
//! The catalog is an explicit value handed to whoever needs it. It starts
//! from the built-in set, or from `~/.mindwell/catalog.yaml` when that file
//! exists, and every entry is validated on load.

pub mod builtin;

use std::collections::HashSet;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::MindwellError;
use crate::features::timer::{BreathingPattern, Exercise, ExerciseKind};

/// Available exercises and breathing patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Guided exercises
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Breathing patterns
    #[serde(default)]
    pub patterns: Vec<BreathingPattern>,
}

/// Completion statistics over the catalog's exercises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionSummary {
    /// Exercises completed at least once
    pub completed: usize,
    /// Exercises in the catalog
    pub total: usize,
    /// Completed share, 0 to 100
    pub rate_percent: f64,
    /// Whole minutes across completed exercises
    pub completed_minutes: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            exercises: builtin::exercises(),
            patterns: builtin::patterns(),
        }
    }

    /// Load the catalog for the given paths.
    ///
    /// Falls back to the built-in catalog when no catalog file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file exists but cannot be read or is
    /// invalid.
    pub fn load(paths: &Paths) -> Result<Self, MindwellError> {
        Self::load_from_path(&paths.catalog)
    }

    /// Load a catalog from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is invalid.
    pub fn load_from_path(path: &Path) -> Result<Self, MindwellError> {
        if !path.exists() {
            debug!("no catalog at {}, using built-in", path.display());
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            MindwellError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let catalog: Self = serde_yaml::from_str(&content).map_err(|e| {
            MindwellError::Parse(format!("Failed to parse {}: {e}", path.display()))
        })?;
        catalog.validate()?;
        debug!(
            "loaded {} exercises and {} patterns from {}",
            catalog.exercises.len(),
            catalog.patterns.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse and validate a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::Parse` for malformed YAML, and a validation
    /// error for zero durations or duplicate ids.
    pub fn from_yaml(content: &str) -> Result<Self, MindwellError> {
        let catalog: Self = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every entry.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::InvalidDuration` for a zero-length exercise or
    /// all-zero pattern, `MindwellError::Config` for a duplicate id.
    pub fn validate(&self) -> Result<(), MindwellError> {
        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            exercise.validate()?;
            if !seen.insert(exercise.id.as_str()) {
                return Err(MindwellError::Config(format!(
                    "duplicate exercise id '{}'",
                    exercise.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for pattern in &self.patterns {
            pattern.validate()?;
            if !seen.insert(pattern.id.as_str()) {
                return Err(MindwellError::Config(format!(
                    "duplicate pattern id '{}'",
                    pattern.id
                )));
            }
        }
        Ok(())
    }

    /// Look up an exercise by id.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::NotFound` if no exercise has that id.
    pub fn exercise(&self, id: &str) -> Result<&Exercise, MindwellError> {
        self.exercises
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| MindwellError::NotFound(format!("exercise '{id}'")))
    }

    /// Resolve a pattern by id, name, or an inline spec like `4-4-4-4`.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::NotFound` if nothing matches and the input is
    /// not a spec, or the spec's own error if it is malformed or all zero.
    pub fn pattern(&self, id_or_spec: &str) -> Result<BreathingPattern, MindwellError> {
        let wanted = id_or_spec.trim();
        if let Some(pattern) = self
            .patterns
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(wanted) || p.name.eq_ignore_ascii_case(wanted))
        {
            return Ok(pattern.clone());
        }

        if wanted.starts_with(|c: char| c.is_ascii_digit()) {
            return BreathingPattern::parse_spec(wanted);
        }
        Err(MindwellError::NotFound(format!(
            "breathing pattern '{wanted}'"
        )))
    }

    /// Exercises of one kind, in catalog order.
    #[must_use]
    pub fn exercises_of_kind(&self, kind: ExerciseKind) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| e.kind == kind).collect()
    }

    /// Flag an exercise as completed.
    ///
    /// Returns false if the id is unknown.
    pub fn mark_completed(&mut self, id: &str) -> bool {
        match self.exercises.iter_mut().find(|e| e.id == id) {
            Some(exercise) => {
                exercise.completed = true;
                true
            }
            None => {
                warn!("completion for unknown exercise '{id}'");
                false
            }
        }
    }

    /// Apply completion flags from stored history.
    pub fn apply_history<'a>(&mut self, completed_ids: impl IntoIterator<Item = &'a str>) {
        for id in completed_ids {
            if let Some(exercise) = self.exercises.iter_mut().find(|e| e.id == id) {
                exercise.completed = true;
            }
        }
    }

    /// Completion statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_summary(&self) -> CompletionSummary {
        let total = self.exercises.len();
        let done: Vec<&Exercise> = self.exercises.iter().filter(|e| e.completed).collect();
        let completed = done.len();
        let rate_percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        let completed_secs: u64 = done.iter().map(|e| u64::from(e.duration_secs)).sum();

        CompletionSummary {
            completed,
            total,
            rate_percent,
            completed_minutes: completed_secs / 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::timer::Difficulty;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.exercises.len(), 6);
        assert_eq!(catalog.patterns.len(), 4);
        catalog.validate().unwrap();
    }

    #[test]
    fn test_exercise_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.exercise("3").unwrap().title, "Body Scan Meditation");
        assert!(matches!(
            catalog.exercise("99"),
            Err(MindwellError::NotFound(_))
        ));
    }

    #[test]
    fn test_pattern_by_id_name_and_spec() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.pattern("box").unwrap().durations(), [4, 4, 4, 4]);
        assert_eq!(
            catalog.pattern("Coherent Breathing").unwrap().durations(),
            [5, 0, 5, 0]
        );
        assert_eq!(catalog.pattern("4-7-8").unwrap().name, "4-7-8 Breathing");
        assert_eq!(catalog.pattern("3-3-6").unwrap().durations(), [3, 3, 6, 0]);
        assert!(matches!(
            catalog.pattern("square"),
            Err(MindwellError::NotFound(_))
        ));
        assert!(matches!(
            catalog.pattern("0-0-0"),
            Err(MindwellError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_exercises_of_kind() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog
            .exercises_of_kind(ExerciseKind::Breathing)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_completion_summary() {
        let mut catalog = Catalog::builtin();
        let empty = catalog.completion_summary();
        assert_eq!(empty.completed, 0);
        assert!(empty.rate_percent.abs() < f64::EPSILON);

        assert!(catalog.mark_completed("1"));
        assert!(catalog.mark_completed("4"));
        assert!(!catalog.mark_completed("nope"));

        let summary = catalog.completion_summary();
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.completed_minutes, 13);
        assert!((summary.rate_percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_history() {
        let mut catalog = Catalog::builtin();
        catalog.apply_history(["2", "6", "ghost"]);
        assert!(catalog.exercise("2").unwrap().completed);
        assert!(catalog.exercise("6").unwrap().completed);
        assert!(!catalog.exercise("1").unwrap().completed);
    }

    #[test]
    fn test_yaml_catalog_rejects_zero_duration() {
        let yaml = r"
exercises:
  - id: a
    title: Nothing
    duration_secs: 0
    kind: mindfulness
    difficulty: beginner
";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(MindwellError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_yaml_catalog_rejects_duplicates() {
        let yaml = r"
patterns:
  - { id: p, name: One, inhale: 4, exhale: 4 }
  - { id: p, name: Two, inhale: 5, exhale: 5 }
";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(MindwellError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");

        assert_eq!(Catalog::load_from_path(&path).unwrap(), Catalog::builtin());

        let mut custom = Catalog {
            exercises: vec![Exercise::new(
                "walk",
                "Walking Meditation",
                240,
                ExerciseKind::Mindfulness,
                Difficulty::Beginner,
            )],
            patterns: vec![BreathingPattern::new("slow", "Slow", [6, 0, 6, 0])],
        };
        std::fs::write(&path, serde_yaml::to_string(&custom).unwrap()).unwrap();

        let loaded = Catalog::load_from_path(&path).unwrap();
        assert_eq!(loaded, custom);

        custom.exercises[0].duration_secs = 0;
        std::fs::write(&path, serde_yaml::to_string(&custom).unwrap()).unwrap();
        assert!(matches!(
            Catalog::load_from_path(&path),
            Err(MindwellError::InvalidDuration(_))
        ));

        std::fs::write(&path, "exercises: [").unwrap();
        match Catalog::load_from_path(&path) {
            Err(MindwellError::Parse(msg)) => assert!(msg.contains("catalog.yaml")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_completion_summary_with_long_exercises() {
        let mut long = Exercise::new(
            "retreat",
            "Silent Retreat",
            3_000_000_000,
            ExerciseKind::Mindfulness,
            Difficulty::Advanced,
        );
        long.completed = true;
        let mut second = long.clone();
        second.id = "retreat-2".to_string();

        let catalog = Catalog {
            exercises: vec![long, second],
            patterns: Vec::new(),
        };
        let summary = catalog.completion_summary();
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.completed_minutes, 100_000_000);
    }
}
