//! The timer engine.
//!
//! Owns at most one [`TimerSession`] and advances it one second per tick
//! while it is running. Ticks come from the engine's single [`Ticker`], which
//! is armed on start and resume and disarmed on pause, reset, stop,
//! completion and replacement, so a paused or replaced session never sees a
//! stray tick.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::clock::{Clock, Ticker};
use super::exercise::Exercise;
use super::pattern::{BreathPhase, BreathingPattern};
use crate::error::MindwellError;
use crate::features::progress::{Completion, ProgressDelta};

/// Whether the session is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Ticks are being applied
    Running,
    /// Waiting for resume
    Paused,
    /// Exercise reached zero; terminal until reset or replaced
    Completed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// What the active session is running, with its countdown state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTarget {
    /// Fixed-duration guided exercise
    Exercise {
        /// The session's own copy of the exercise
        exercise: Exercise,
        /// Seconds left
        remaining: u32,
    },
    /// Repeating breathing pattern
    Breathing {
        /// The session's own copy of the pattern
        pattern: BreathingPattern,
        /// Current phase
        phase: BreathPhase,
        /// Seconds left in the current phase
        phase_remaining: u32,
        /// Full cycles finished
        cycles: u32,
    },
}

/// Kind of target, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Exercise,
    Breathing,
}

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// An exercise reached zero.
    Completed(Completion),
    /// A breathing pattern moved to a new phase.
    PhaseChanged {
        /// Phase entered
        phase: BreathPhase,
        /// Cycles finished so far
        cycles: u32,
    },
}

/// Runtime state of the active exercise or pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    target: SessionTarget,
    status: SessionStatus,
    ticks: u64,
}

impl TimerSession {
    fn for_exercise(mut exercise: Exercise) -> Result<Self, MindwellError> {
        exercise.validate()?;
        exercise.completed = false;
        Ok(Self {
            target: SessionTarget::Exercise {
                remaining: exercise.duration_secs,
                exercise,
            },
            status: SessionStatus::Running,
            ticks: 0,
        })
    }

    fn for_pattern(pattern: BreathingPattern) -> Result<Self, MindwellError> {
        pattern.validate()?;
        let phase = pattern.first_phase().ok_or_else(|| {
            MindwellError::InvalidDuration(format!("pattern '{}' has no phases", pattern.id))
        })?;
        Ok(Self {
            target: SessionTarget::Breathing {
                phase_remaining: pattern.phase_duration(phase),
                phase,
                cycles: 0,
                pattern,
            },
            status: SessionStatus::Running,
            ticks: 0,
        })
    }

    /// The active target.
    #[must_use]
    pub const fn target(&self) -> &SessionTarget {
        &self.target
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether ticks are being applied.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Ticks applied since the last start or reset.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds left on the displayed countdown.
    ///
    /// For exercises this is the whole session, for breathing patterns the
    /// current phase.
    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        match &self.target {
            SessionTarget::Exercise { remaining, .. } => *remaining,
            SessionTarget::Breathing {
                phase_remaining, ..
            } => *phase_remaining,
        }
    }

    /// Length of the displayed countdown.
    #[must_use]
    pub const fn total_secs(&self) -> u32 {
        match &self.target {
            SessionTarget::Exercise { exercise, .. } => exercise.duration_secs,
            SessionTarget::Breathing { pattern, phase, .. } => pattern.phase_duration(*phase),
        }
    }

    /// `(total - remaining) / total * 100`, derived on every call.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        f64::from(total - self.remaining_secs()) / f64::from(total) * 100.0
    }

    /// Current breathing phase, if a pattern is active.
    #[must_use]
    pub const fn phase(&self) -> Option<BreathPhase> {
        match &self.target {
            SessionTarget::Breathing { phase, .. } => Some(*phase),
            SessionTarget::Exercise { .. } => None,
        }
    }

    /// Breathing cycles finished.
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        match &self.target {
            SessionTarget::Breathing { cycles, .. } => *cycles,
            SessionTarget::Exercise { .. } => 0,
        }
    }

    /// Catalog id of the target.
    #[must_use]
    pub fn target_id(&self) -> &str {
        match &self.target {
            SessionTarget::Exercise { exercise, .. } => &exercise.id,
            SessionTarget::Breathing { pattern, .. } => &pattern.id,
        }
    }

    /// Display title of the target.
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.target {
            SessionTarget::Exercise { exercise, .. } => &exercise.title,
            SessionTarget::Breathing { pattern, .. } => &pattern.name,
        }
    }

    /// Whether the exercise has completed in this run.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Decrement, check the boundary, transition. All in one step.
    fn apply_tick(&mut self) -> Option<TimerEvent> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.ticks += 1;

        match &mut self.target {
            SessionTarget::Exercise {
                exercise,
                remaining,
            } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining > 0 {
                    return None;
                }
                self.status = SessionStatus::Completed;
                exercise.completed = true;
                Some(TimerEvent::Completed(Completion {
                    exercise_id: exercise.id.clone(),
                    title: exercise.title.clone(),
                    duration_secs: exercise.duration_secs,
                    delta: ProgressDelta::for_exercise(exercise.duration_secs),
                }))
            }
            SessionTarget::Breathing {
                pattern,
                phase,
                phase_remaining,
                cycles,
            } => {
                *phase_remaining = phase_remaining.saturating_sub(1);
                if *phase_remaining > 0 {
                    return None;
                }
                let next = pattern.next_phase(*phase);
                if next.index() <= phase.index() {
                    *cycles += 1;
                }
                *phase = next;
                *phase_remaining = pattern.phase_duration(next);
                Some(TimerEvent::PhaseChanged {
                    phase: next,
                    cycles: *cycles,
                })
            }
        }
    }

    fn rewind(&mut self) {
        match &mut self.target {
            SessionTarget::Exercise {
                exercise,
                remaining,
            } => {
                *remaining = exercise.duration_secs;
                exercise.completed = false;
            }
            SessionTarget::Breathing {
                pattern,
                phase,
                phase_remaining,
                cycles,
            } => {
                if let Some(first) = pattern.first_phase() {
                    *phase = first;
                }
                *phase_remaining = pattern.phase_duration(*phase);
                *cycles = 0;
            }
        }
        self.status = SessionStatus::Paused;
        self.ticks = 0;
    }
}

/// Display state of the active session at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub target_id: String,
    pub title: String,
    pub kind: TargetKind,
    pub status: SessionStatus,
    pub running: bool,
    pub remaining_secs: u32,
    pub elapsed_secs: u32,
    pub total_secs: u32,
    pub progress_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<BreathPhase>,
    pub cycles: u32,
    pub ticks: u64,
}

impl From<&TimerSession> for TimerSnapshot {
    fn from(session: &TimerSession) -> Self {
        let kind = match session.target {
            SessionTarget::Exercise { .. } => TargetKind::Exercise,
            SessionTarget::Breathing { .. } => TargetKind::Breathing,
        };
        Self {
            target_id: session.target_id().to_string(),
            title: session.title().to_string(),
            kind,
            status: session.status,
            running: session.is_running(),
            remaining_secs: session.remaining_secs(),
            elapsed_secs: session.total_secs() - session.remaining_secs(),
            total_secs: session.total_secs(),
            progress_percent: session.progress_percent(),
            phase: session.phase(),
            cycles: session.cycles(),
            ticks: session.ticks,
        }
    }
}

/// Single-session timer driven by a [`Clock`].
#[derive(Debug)]
pub struct TimerEngine<C: Clock> {
    clock: C,
    ticker: Ticker,
    session: Option<TimerSession>,
}

impl<C: Clock> TimerEngine<C> {
    /// Create an engine ticking once per second.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_interval(clock, Duration::from_secs(1))
    }

    /// Create an engine with a custom wall-clock tick interval.
    ///
    /// Each tick still counts as one second of session time.
    #[must_use]
    pub fn with_interval(clock: C, interval: Duration) -> Self {
        Self {
            clock,
            ticker: Ticker::new(interval),
            session: None,
        }
    }

    /// Start an exercise, discarding any active session.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::InvalidDuration` for a zero-length exercise;
    /// the active session is left untouched in that case.
    pub fn start_exercise(&mut self, exercise: Exercise) -> Result<(), MindwellError> {
        let session = TimerSession::for_exercise(exercise)?;
        debug!(
            "starting exercise '{}' ({}s)",
            session.target_id(),
            session.total_secs()
        );
        self.install(session);
        Ok(())
    }

    /// Start a breathing pattern, discarding any active session.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::InvalidDuration` when every phase is zero;
    /// the active session is left untouched in that case.
    pub fn start_breathing_pattern(
        &mut self,
        pattern: BreathingPattern,
    ) -> Result<(), MindwellError> {
        let session = TimerSession::for_pattern(pattern)?;
        debug!(
            "starting breathing pattern '{}' in phase {:?}",
            session.target_id(),
            session.phase()
        );
        self.install(session);
        Ok(())
    }

    fn install(&mut self, session: TimerSession) {
        self.ticker.disarm();
        if let Some(previous) = self.session.replace(session) {
            debug!("replaced session '{}'", previous.target_id());
        }
        self.ticker.arm(self.clock.now());
    }

    /// Flip between running and paused.
    ///
    /// Returns false without a session or on a completed exercise.
    pub fn toggle_play_pause(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.status {
            SessionStatus::Running => {
                session.status = SessionStatus::Paused;
                self.ticker.disarm();
                debug!("paused '{}'", session.target_id());
            }
            SessionStatus::Paused => {
                session.status = SessionStatus::Running;
                self.ticker.arm(self.clock.now());
                debug!("resumed '{}'", session.target_id());
            }
            SessionStatus::Completed => return false,
        }
        true
    }

    /// Rewind the active session to its starting state, paused.
    ///
    /// No-op without a session.
    pub fn reset(&mut self) {
        if let Some(session) = self.session.as_mut() {
            self.ticker.disarm();
            session.rewind();
            debug!("reset '{}'", session.target_id());
        }
    }

    /// Clear the active session.
    pub fn stop(&mut self) -> Option<TimerSession> {
        self.ticker.disarm();
        self.session.take()
    }

    /// Apply one second to the active session.
    ///
    /// Does nothing unless the session is running.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        let session = self.session.as_mut()?;
        let event = session.apply_tick();
        if let Some(TimerEvent::Completed(completion)) = &event {
            self.ticker.disarm();
            info!(
                "completed exercise '{}' after {} ticks",
                completion.exercise_id, session.ticks
            );
        }
        event
    }

    /// Apply every tick that has come due on the clock.
    pub fn poll(&mut self) -> Vec<TimerEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();
        while self.ticker.fire_one(now) {
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    /// The active session.
    #[must_use]
    pub const fn session(&self) -> Option<&TimerSession> {
        self.session.as_ref()
    }

    /// Display state of the active session.
    #[must_use]
    pub fn snapshot(&self) -> Option<TimerSnapshot> {
        self.session.as_ref().map(TimerSnapshot::from)
    }

    /// The tick subscription.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// The engine's clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::timer::clock::VirtualClock;
    use crate::features::timer::exercise::{Difficulty, ExerciseKind};

    fn exercise(duration_secs: u32) -> Exercise {
        Exercise::new(
            "ex",
            "Test Exercise",
            duration_secs,
            ExerciseKind::Mindfulness,
            Difficulty::Beginner,
        )
    }

    fn engine() -> (TimerEngine<VirtualClock>, VirtualClock) {
        crate::logging::init_test();
        let clock = VirtualClock::new();
        (TimerEngine::new(clock.clone()), clock)
    }

    fn completions(events: &[TimerEvent]) -> Vec<&Completion> {
        events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Completed(c) => Some(c),
                TimerEvent::PhaseChanged { .. } => None,
            })
            .collect()
    }

    fn advance(engine: &mut TimerEngine<VirtualClock>, clock: &VirtualClock, secs: u64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..secs {
            clock.advance_secs(1);
            events.extend(engine.poll());
        }
        events
    }

    #[test]
    fn test_exercise_completes_after_exactly_duration_ticks() {
        for duration in [1, 5, 59, 60, 61, 125, 600] {
            let (mut engine, clock) = engine();
            engine.start_exercise(exercise(duration)).unwrap();

            let early = advance(&mut engine, &clock, u64::from(duration) - 1);
            assert!(completions(&early).is_empty(), "duration {duration}");
            assert!(engine.session().unwrap().is_running());

            let events = advance(&mut engine, &clock, 1);
            let done = completions(&events);
            assert_eq!(done.len(), 1, "duration {duration}");
            assert_eq!(done[0].delta.minutes, duration / 60);

            let snap = engine.snapshot().unwrap();
            assert!(!snap.running);
            assert_eq!(snap.remaining_secs, 0);
            assert!((snap.progress_percent - 100.0).abs() < f64::EPSILON);

            // Nothing further fires once completed.
            assert!(advance(&mut engine, &clock, 10).is_empty());
            assert!(!engine.ticker().is_armed());
        }
    }

    #[test]
    fn test_scenario_five_second_exercise() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(5)).unwrap();

        let events = advance(&mut engine, &clock, 5);

        let session = engine.session().unwrap();
        assert_eq!(session.remaining_secs(), 0);
        assert!((session.progress_percent() - 100.0).abs() < f64::EPSILON);
        assert!(session.is_completed());
        match session.target() {
            SessionTarget::Exercise { exercise, .. } => assert!(exercise.completed),
            SessionTarget::Breathing { .. } => panic!("expected exercise"),
        }

        assert_eq!(
            completions(&events)
                .iter()
                .map(|c| c.delta)
                .collect::<Vec<_>>(),
            vec![ProgressDelta {
                sessions: 1,
                minutes: 0,
                streak: 1,
                weekly: 1
            }]
        );
    }

    #[test]
    fn test_progress_recomputed_each_tick() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(4)).unwrap();
        assert!(engine.snapshot().unwrap().progress_percent.abs() < f64::EPSILON);

        advance(&mut engine, &clock, 1);
        assert!((engine.snapshot().unwrap().progress_percent - 25.0).abs() < f64::EPSILON);
        advance(&mut engine, &clock, 2);
        assert!((engine.snapshot().unwrap().progress_percent - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scenario_pause_gap_consumes_no_ticks() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(10)).unwrap();

        advance(&mut engine, &clock, 3);
        assert!(engine.toggle_play_pause());
        assert!(!engine.ticker().is_armed());

        // 100 seconds of wall-clock with nobody touching the engine.
        clock.advance_secs(100);
        assert!(engine.poll().is_empty());
        assert_eq!(engine.session().unwrap().remaining_secs(), 7);

        assert!(engine.toggle_play_pause());
        let events = advance(&mut engine, &clock, 7);

        let session = engine.session().unwrap();
        assert_eq!(session.remaining_secs(), 0);
        assert!(session.is_completed());
        assert_eq!(completions(&events).len(), 1);
        assert_eq!(engine.ticker().fired(), 10);
    }

    #[test]
    fn test_tick_while_paused_is_ignored() {
        let (mut engine, _clock) = engine();
        engine.start_exercise(exercise(10)).unwrap();
        engine.toggle_play_pause();

        assert!(engine.tick().is_none());
        assert_eq!(engine.session().unwrap().remaining_secs(), 10);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(30)).unwrap();
        advance(&mut engine, &clock, 12);

        engine.reset();
        let once = engine.snapshot();
        engine.reset();
        assert_eq!(engine.snapshot(), once);

        let snap = once.unwrap();
        assert_eq!(snap.remaining_secs, 30);
        assert!(!snap.running);
        assert_eq!(snap.status, SessionStatus::Paused);
        assert!(snap.progress_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_after_completion_starts_a_new_run() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(2)).unwrap();
        advance(&mut engine, &clock, 2);
        assert!(!engine.toggle_play_pause());

        engine.reset();
        assert!(engine.toggle_play_pause());
        let events = advance(&mut engine, &clock, 2);
        assert_eq!(completions(&events).len(), 1);
    }

    #[test]
    fn test_operations_without_session_are_noops() {
        let (mut engine, clock) = engine();
        assert!(!engine.toggle_play_pause());
        engine.reset();
        assert!(engine.tick().is_none());
        clock.advance_secs(5);
        assert!(engine.poll().is_empty());
        assert!(engine.snapshot().is_none());
    }

    #[test]
    fn test_zero_duration_exercise_rejected() {
        let (mut engine, _clock) = engine();
        engine.start_exercise(exercise(8)).unwrap();

        let err = engine.start_exercise(exercise(0)).unwrap_err();
        assert!(matches!(err, MindwellError::InvalidDuration(_)));
        assert_eq!(engine.session().unwrap().total_secs(), 8);
    }

    #[test]
    fn test_all_zero_pattern_rejected() {
        let (mut engine, _clock) = engine();
        let err = engine
            .start_breathing_pattern(BreathingPattern::new("z", "Zero", [0; 4]))
            .unwrap_err();
        assert!(matches!(err, MindwellError::InvalidDuration(_)));
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_replacing_session_leaves_one_tick_loop() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(60)).unwrap();

        clock.advance_millis(2500);
        engine.poll();
        assert_eq!(engine.session().unwrap().remaining_secs(), 58);

        engine.start_exercise(exercise(20)).unwrap();
        assert_eq!(engine.session().unwrap().remaining_secs(), 20);

        // The old loop would have ticked at 3.0s.
        clock.advance_millis(500);
        assert!(engine.poll().is_empty());
        assert_eq!(engine.session().unwrap().remaining_secs(), 20);

        clock.advance_millis(500);
        engine.poll();
        assert_eq!(engine.session().unwrap().remaining_secs(), 19);
        assert_eq!(engine.session().unwrap().ticks(), 1);
    }

    #[test]
    fn test_start_pattern_replaces_running_exercise() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(60)).unwrap();
        advance(&mut engine, &clock, 3);

        engine
            .start_breathing_pattern(BreathingPattern::new("box", "Box", [4, 4, 4, 4]))
            .unwrap();
        let events = advance(&mut engine, &clock, 4);

        assert!(completions(&events).is_empty());
        assert_eq!(engine.session().unwrap().phase(), Some(BreathPhase::Hold));
    }

    #[test]
    fn test_scenario_four_seven_eight() {
        let (mut engine, clock) = engine();
        engine
            .start_breathing_pattern(BreathingPattern::new("478", "4-7-8", [4, 7, 8, 0]))
            .unwrap();
        assert_eq!(engine.session().unwrap().phase(), Some(BreathPhase::Inhale));
        assert_eq!(engine.session().unwrap().remaining_secs(), 4);

        advance(&mut engine, &clock, 4);
        assert_eq!(engine.session().unwrap().phase(), Some(BreathPhase::Hold));

        advance(&mut engine, &clock, 7);
        assert_eq!(engine.session().unwrap().phase(), Some(BreathPhase::Exhale));

        advance(&mut engine, &clock, 8);
        let session = engine.session().unwrap();
        assert_eq!(session.phase(), Some(BreathPhase::Inhale));
        assert_eq!(session.cycles(), 1);
        assert!(session.is_running());
    }

    #[test]
    fn test_breathing_phase_sequence_matches_durations() {
        let patterns = [
            [4, 7, 8, 0],
            [4, 4, 4, 4],
            [5, 0, 5, 0],
            [0, 2, 0, 3],
            [1, 0, 0, 0],
            [0, 0, 5, 1],
        ];

        for durations in patterns {
            let (mut engine, _clock) = engine();
            engine
                .start_breathing_pattern(BreathingPattern::new("p", "P", durations))
                .unwrap();

            let mut expected = Vec::new();
            for (phase, secs) in BreathPhase::CYCLE.iter().zip(durations) {
                expected.extend(std::iter::repeat(*phase).take(secs as usize));
            }
            let cycle: u32 = durations.iter().sum();

            for round in 0..3 {
                let mut observed = Vec::new();
                for _ in 0..cycle {
                    observed.push(engine.session().unwrap().phase().unwrap());
                    engine.tick();
                }
                assert_eq!(observed, expected, "pattern {durations:?}, round {round}");
                assert_eq!(engine.session().unwrap().cycles(), round + 1);
            }
        }
    }

    #[test]
    fn test_breathing_never_completes() {
        let (mut engine, clock) = engine();
        engine
            .start_breathing_pattern(BreathingPattern::new("c", "Coherent", [5, 0, 5, 0]))
            .unwrap();

        let events = advance(&mut engine, &clock, 1000);
        assert!(completions(&events).is_empty());
        assert!(engine.ticker().is_armed());
        assert_eq!(engine.session().unwrap().cycles(), 100);
    }

    #[test]
    fn test_breathing_reset_returns_to_first_phase() {
        let (mut engine, clock) = engine();
        engine
            .start_breathing_pattern(BreathingPattern::new("478", "4-7-8", [4, 7, 8, 0]))
            .unwrap();
        advance(&mut engine, &clock, 25);

        engine.reset();
        let session = engine.session().unwrap();
        assert_eq!(session.phase(), Some(BreathPhase::Inhale));
        assert_eq!(session.remaining_secs(), 4);
        assert_eq!(session.cycles(), 0);
        assert!(!session.is_running());

        clock.advance_secs(30);
        assert!(engine.poll().is_empty());
    }

    #[test]
    fn test_stop_clears_session() {
        let (mut engine, clock) = engine();
        engine.start_exercise(exercise(10)).unwrap();
        let stopped = engine.stop().unwrap();
        assert_eq!(stopped.target_id(), "ex");
        assert!(engine.session().is_none());
        assert!(!engine.ticker().is_armed());

        clock.advance_secs(20);
        assert!(engine.poll().is_empty());
    }

    #[test]
    fn test_session_copy_is_isolated_from_catalog() {
        let (mut engine, clock) = engine();
        let mut catalog_entry = exercise(3);
        catalog_entry.completed = true;
        engine.start_exercise(catalog_entry.clone()).unwrap();

        match engine.session().unwrap().target() {
            SessionTarget::Exercise { exercise, .. } => assert!(!exercise.completed),
            SessionTarget::Breathing { .. } => panic!("expected exercise"),
        }
        catalog_entry.duration_secs = 999;
        advance(&mut engine, &clock, 3);
        assert!(engine.session().unwrap().is_completed());
    }

    #[test]
    fn test_fast_interval_still_counts_seconds() {
        let clock = VirtualClock::new();
        let mut engine = TimerEngine::with_interval(clock.clone(), Duration::from_millis(10));
        engine.start_exercise(exercise(3)).unwrap();

        clock.advance_millis(1000);
        let events = engine.poll();
        assert_eq!(completions(&events).len(), 1);
        assert_eq!(engine.ticker().fired(), 3);
    }
}
