//! Breathing patterns: four-phase cycles that repeat until stopped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MindwellError;

static PATTERN_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,3})\s*-\s*(\d{1,3})\s*-\s*(\d{1,3})(?:\s*-\s*(\d{1,3}))?\s*$")
        .unwrap_or_else(|e| panic!("Invalid pattern spec regex: {e}"))
});

/// One phase of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    HoldAfterExhale,
}

impl BreathPhase {
    /// Phases in cycle order.
    pub const CYCLE: [Self; 4] = [Self::Inhale, Self::Hold, Self::Exhale, Self::HoldAfterExhale];

    /// Position within the cycle.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Inhale => 0,
            Self::Hold => 1,
            Self::Exhale => 2,
            Self::HoldAfterExhale => 3,
        }
    }

    /// The phase that follows this one, ignoring durations.
    #[must_use]
    pub const fn successor(self) -> Self {
        match self {
            Self::Inhale => Self::Hold,
            Self::Hold => Self::Exhale,
            Self::Exhale => Self::HoldAfterExhale,
            Self::HoldAfterExhale => Self::Inhale,
        }
    }

    /// Instruction shown to the user.
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::Inhale => "Breathe in",
            Self::Hold => "Hold",
            Self::Exhale => "Breathe out",
            Self::HoldAfterExhale => "Hold (empty)",
        }
    }
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inhale => write!(f, "inhale"),
            Self::Hold => write!(f, "hold"),
            Self::Exhale => write!(f, "exhale"),
            Self::HoldAfterExhale => write!(f, "holdAfterExhale"),
        }
    }
}

/// A cyclical four-phase breathing pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingPattern {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Inhale seconds
    pub inhale: u32,
    /// Hold seconds after inhaling
    #[serde(default)]
    pub hold: u32,
    /// Exhale seconds
    pub exhale: u32,
    /// Hold seconds after exhaling
    #[serde(default)]
    pub hold_after_exhale: u32,
    /// Short description
    #[serde(default)]
    pub description: String,
}

impl BreathingPattern {
    /// Create a pattern with an empty description.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        [inhale, hold, exhale, hold_after_exhale]: [u32; 4],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            inhale,
            hold,
            exhale,
            hold_after_exhale,
            description: String::new(),
        }
    }

    /// Parse an inline spec like `4-7-8` or `4-4-4-4`.
    ///
    /// A three-part spec leaves the hold after exhaling at zero.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::Parse` for malformed specs and
    /// `MindwellError::InvalidDuration` when every phase is zero.
    pub fn parse_spec(spec: &str) -> Result<Self, MindwellError> {
        let caps = PATTERN_SPEC.captures(spec).ok_or_else(|| {
            MindwellError::Parse(format!(
                "Invalid breathing pattern '{spec}' (expected e.g. 4-7-8 or 4-4-4-4)"
            ))
        })?;

        let part = |i: usize| -> Result<u32, MindwellError> {
            caps.get(i).map_or(Ok(0), |m| {
                m.as_str()
                    .parse()
                    .map_err(|e| MindwellError::Parse(format!("Invalid phase length: {e}")))
            })
        };

        let durations = [part(1)?, part(2)?, part(3)?, part(4)?];
        let pattern = Self::new(
            Self::label_of(durations),
            format!("Custom {}", Self::label_of(durations)),
            durations,
        );
        pattern.validate()?;
        Ok(pattern)
    }

    fn label_of(durations: [u32; 4]) -> String {
        durations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Phase lengths as `inhale-hold-exhale-holdAfterExhale`.
    #[must_use]
    pub fn label(&self) -> String {
        Self::label_of(self.durations())
    }

    /// Phase lengths in cycle order.
    #[must_use]
    pub const fn durations(&self) -> [u32; 4] {
        [self.inhale, self.hold, self.exhale, self.hold_after_exhale]
    }

    /// Seconds spent in `phase` each cycle.
    #[must_use]
    pub const fn phase_duration(&self, phase: BreathPhase) -> u32 {
        match phase {
            BreathPhase::Inhale => self.inhale,
            BreathPhase::Hold => self.hold,
            BreathPhase::Exhale => self.exhale,
            BreathPhase::HoldAfterExhale => self.hold_after_exhale,
        }
    }

    /// Seconds in one full cycle.
    #[must_use]
    pub const fn cycle_secs(&self) -> u32 {
        self.inhale + self.hold + self.exhale + self.hold_after_exhale
    }

    /// First phase with a non-zero length, starting from inhale.
    #[must_use]
    pub fn first_phase(&self) -> Option<BreathPhase> {
        BreathPhase::CYCLE
            .into_iter()
            .find(|p| self.phase_duration(*p) > 0)
    }

    /// Next phase with a non-zero length after `current`, wrapping around.
    ///
    /// Returns `current` itself when it is the only non-zero phase.
    #[must_use]
    pub fn next_phase(&self, current: BreathPhase) -> BreathPhase {
        let mut phase = current.successor();
        for _ in 0..BreathPhase::CYCLE.len() {
            if self.phase_duration(phase) > 0 {
                return phase;
            }
            phase = phase.successor();
        }
        current
    }

    /// Reject patterns whose cycle never advances.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::InvalidDuration` when every phase is zero.
    pub fn validate(&self) -> Result<(), MindwellError> {
        if self.cycle_secs() == 0 {
            return Err(MindwellError::InvalidDuration(format!(
                "breathing pattern '{}' has no non-zero phase",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_part_spec() {
        let p = BreathingPattern::parse_spec("4-7-8").unwrap();
        assert_eq!(p.durations(), [4, 7, 8, 0]);
        assert_eq!(p.id, "4-7-8-0");
    }

    #[test]
    fn test_parse_four_part_spec_with_spaces() {
        let p = BreathingPattern::parse_spec(" 4 - 4 - 4 - 4 ").unwrap();
        assert_eq!(p.durations(), [4, 4, 4, 4]);
        assert_eq!(p.cycle_secs(), 16);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            BreathingPattern::parse_spec("box"),
            Err(MindwellError::Parse(_))
        ));
        assert!(matches!(
            BreathingPattern::parse_spec("4-7"),
            Err(MindwellError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_all_zero() {
        assert!(matches!(
            BreathingPattern::parse_spec("0-0-0-0"),
            Err(MindwellError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_first_phase_skips_zero_inhale() {
        let p = BreathingPattern::new("p", "P", [0, 0, 5, 1]);
        assert_eq!(p.first_phase(), Some(BreathPhase::Exhale));
        assert_eq!(BreathingPattern::new("z", "Z", [0; 4]).first_phase(), None);
    }

    #[test]
    fn test_next_phase_skips_zero_phases() {
        let p = BreathingPattern::new("478", "4-7-8", [4, 7, 8, 0]);
        assert_eq!(p.next_phase(BreathPhase::Inhale), BreathPhase::Hold);
        assert_eq!(p.next_phase(BreathPhase::Exhale), BreathPhase::Inhale);

        let coherent = BreathingPattern::new("c", "Coherent", [5, 0, 5, 0]);
        assert_eq!(coherent.next_phase(BreathPhase::Inhale), BreathPhase::Exhale);
    }

    #[test]
    fn test_next_phase_single_phase_pattern() {
        let p = BreathingPattern::new("hold", "Hold only", [0, 3, 0, 0]);
        assert_eq!(p.next_phase(BreathPhase::Hold), BreathPhase::Hold);
    }

    #[test]
    fn test_phase_serde_names() {
        let json = serde_json::to_string(&BreathPhase::HoldAfterExhale).unwrap();
        assert_eq!(json, "\"holdAfterExhale\"");
    }
}
