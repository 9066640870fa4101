//! Breathing and meditation timer.
//!
//! Drives one active exercise or breathing pattern:
//! - Fixed-duration guided exercises with a single completion point
//! - Four-phase breathing patterns that cycle until stopped
//! - Play/pause/reset controls and a countdown snapshot
//! - Completion events forwarded to a progress sink

pub mod clock;
pub mod engine;
pub mod exercise;
pub mod format;
pub mod pattern;
pub mod runner;

pub use clock::{Clock, SystemClock, Ticker, VirtualClock};
pub use engine::{
    SessionStatus, SessionTarget, TargetKind, TimerEngine, TimerEvent, TimerSession,
    TimerSnapshot,
};
pub use exercise::{Difficulty, Exercise, ExerciseKind};
pub use format::{format_length, format_mmss, parse_duration, render_progress_bar};
pub use pattern::{BreathPhase, BreathingPattern};
pub use runner::{RunOutcome, SessionRunner};
