//! Built-in exercises and breathing patterns.

use crate::features::timer::{BreathingPattern, Difficulty, Exercise, ExerciseKind};

struct ExerciseSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    duration_secs: u32,
    kind: ExerciseKind,
    difficulty: Difficulty,
    category: &'static str,
    favorite: bool,
}

const EXERCISES: &[ExerciseSeed] = &[
    ExerciseSeed {
        id: "1",
        title: "Breathing Basics",
        description: "Learn fundamental breathing techniques for relaxation and focus",
        duration_secs: 300,
        kind: ExerciseKind::Breathing,
        difficulty: Difficulty::Beginner,
        category: "Stress Relief",
        favorite: true,
    },
    ExerciseSeed {
        id: "2",
        title: "Mindful Moment",
        description: "A quick mindfulness exercise to center yourself during busy days",
        duration_secs: 180,
        kind: ExerciseKind::Mindfulness,
        difficulty: Difficulty::Beginner,
        category: "Quick Sessions",
        favorite: false,
    },
    ExerciseSeed {
        id: "3",
        title: "Body Scan Meditation",
        description: "Progressive relaxation technique for full-body awareness",
        duration_secs: 600,
        kind: ExerciseKind::BodyScan,
        difficulty: Difficulty::Intermediate,
        category: "Deep Relaxation",
        favorite: true,
    },
    ExerciseSeed {
        id: "4",
        title: "Ocean Visualization",
        description: "Guided imagery journey to a peaceful ocean setting",
        duration_secs: 480,
        kind: ExerciseKind::Visualization,
        difficulty: Difficulty::Intermediate,
        category: "Visualization",
        favorite: false,
    },
    ExerciseSeed {
        id: "5",
        title: "Advanced Breathwork",
        description: "Advanced pranayama techniques for experienced practitioners",
        duration_secs: 900,
        kind: ExerciseKind::Breathing,
        difficulty: Difficulty::Advanced,
        category: "Advanced Practice",
        favorite: false,
    },
    ExerciseSeed {
        id: "6",
        title: "Loving Kindness",
        description: "Cultivate compassion and positive emotions towards self and others",
        duration_secs: 420,
        kind: ExerciseKind::Mindfulness,
        difficulty: Difficulty::Intermediate,
        category: "Emotional Wellness",
        favorite: true,
    },
];

const PATTERNS: &[(&str, &str, [u32; 4], &str)] = &[
    (
        "4-7-8",
        "4-7-8 Breathing",
        [4, 7, 8, 0],
        "Relaxing breath: inhale 4, hold 7, exhale 8",
    ),
    (
        "box",
        "Box Breathing",
        [4, 4, 4, 4],
        "Equal four-second sides for steadiness and focus",
    ),
    (
        "coherent",
        "Coherent Breathing",
        [5, 0, 5, 0],
        "Slow, even breathing at about six breaths a minute",
    ),
    (
        "calming",
        "Calming Breath",
        [4, 2, 6, 0],
        "A longer exhale to settle the nervous system",
    ),
];

/// The six guided exercises shipped with the app.
#[must_use]
pub fn exercises() -> Vec<Exercise> {
    EXERCISES
        .iter()
        .map(|seed| Exercise {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            duration_secs: seed.duration_secs,
            kind: seed.kind,
            difficulty: seed.difficulty,
            category: seed.category.to_string(),
            favorite: seed.favorite,
            completed: false,
        })
        .collect()
}

/// The breathing patterns shipped with the app.
#[must_use]
pub fn patterns() -> Vec<BreathingPattern> {
    PATTERNS
        .iter()
        .map(|(id, name, durations, description)| BreathingPattern {
            description: (*description).to_string(),
            ..BreathingPattern::new(*id, *name, *durations)
        })
        .collect()
}
