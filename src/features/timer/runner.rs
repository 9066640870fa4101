//! Glue between the engine, the catalog and a progress sink.

use log::{info, warn};
use serde::Serialize;

use super::clock::Clock;
use super::engine::{TimerEngine, TimerEvent, TimerSnapshot};
use crate::error::MindwellError;
use crate::features::catalog::Catalog;
use crate::features::progress::{Completion, ProgressSink};

/// Runs catalog entries on a [`TimerEngine`] and reports completions.
pub struct SessionRunner<C: Clock, S: ProgressSink> {
    engine: TimerEngine<C>,
    sink: S,
    catalog: Catalog,
}

impl<C: Clock, S: ProgressSink> SessionRunner<C, S> {
    /// Create a runner.
    pub const fn new(engine: TimerEngine<C>, sink: S, catalog: Catalog) -> Self {
        Self {
            engine,
            sink,
            catalog,
        }
    }

    /// Start a catalog exercise.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::NotFound` for an unknown id and
    /// `MindwellError::InvalidDuration` for a zero-length exercise.
    pub fn start_exercise(&mut self, id: &str) -> Result<(), MindwellError> {
        let exercise = self.catalog.exercise(id)?.clone();
        self.engine.start_exercise(exercise)
    }

    /// Start a catalog exercise with a different length.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start_exercise`].
    pub fn start_exercise_for(&mut self, id: &str, duration_secs: u32) -> Result<(), MindwellError> {
        let mut exercise = self.catalog.exercise(id)?.clone();
        exercise.duration_secs = duration_secs;
        self.engine.start_exercise(exercise)
    }

    /// Start a breathing pattern by id, name or inline spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be resolved or is all zero.
    pub fn start_pattern(&mut self, id_or_spec: &str) -> Result<(), MindwellError> {
        let pattern = self.catalog.pattern(id_or_spec)?;
        self.engine.start_breathing_pattern(pattern)
    }

    /// Flip play/pause. See [`TimerEngine::toggle_play_pause`].
    pub fn toggle(&mut self) -> bool {
        self.engine.toggle_play_pause()
    }

    /// Rewind the active session.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Clear the active session.
    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Apply due ticks and hand completions to the sink.
    ///
    /// The catalog is marked even when the sink fails, so the finished run
    /// still shows as completed for the rest of this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to record a completion.
    pub fn pump(&mut self) -> Result<Vec<TimerEvent>, MindwellError> {
        let events = self.engine.poll();
        for event in &events {
            if let TimerEvent::Completed(completion) = event {
                self.catalog.mark_completed(&completion.exercise_id);
                if let Err(e) = self.sink.record_completion(completion) {
                    warn!(
                        "failed to record completion of '{}': {e}",
                        completion.exercise_id
                    );
                    return Err(e);
                }
                info!(
                    "recorded completion of '{}' (+{} min)",
                    completion.exercise_id, completion.delta.minutes
                );
            }
        }
        Ok(events)
    }

    /// Display state of the active session.
    ///
    /// # Errors
    ///
    /// Returns `MindwellError::NoActiveSession` when nothing is running.
    pub fn snapshot(&self) -> Result<TimerSnapshot, MindwellError> {
        self.engine.snapshot().ok_or(MindwellError::NoActiveSession)
    }

    /// The underlying engine.
    pub const fn engine(&self) -> &TimerEngine<C> {
        &self.engine
    }

    /// The catalog, with completion flags updated.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The progress sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink and catalog.
    pub fn into_parts(self) -> (S, Catalog) {
        (self.sink, self.catalog)
    }
}

/// What happened while a runner was driven.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Exercises completed, in order
    pub completions: Vec<Completion>,
    /// Cycles reached by the most recent breathing session
    pub cycles: u32,
}

impl RunOutcome {
    /// Fold a batch of engine events into the outcome.
    pub fn absorb(&mut self, events: &[TimerEvent]) {
        for event in events {
            match event {
                TimerEvent::Completed(completion) => self.completions.push(completion.clone()),
                TimerEvent::PhaseChanged { cycles, .. } => self.cycles = *cycles,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::progress::{MockProgressSink, ProgressRecord};
    use crate::features::timer::clock::VirtualClock;
    use crate::features::timer::{BreathPhase, SessionStatus};

    fn runner<S: ProgressSink>(sink: S) -> (SessionRunner<VirtualClock, S>, VirtualClock) {
        let clock = VirtualClock::new();
        let engine = TimerEngine::new(clock.clone());
        (SessionRunner::new(engine, sink, Catalog::builtin()), clock)
    }

    #[test]
    fn test_completion_forwarded_once() {
        let mut sink = MockProgressSink::new();
        sink.expect_record_completion()
            .withf(|c| c.exercise_id == "2" && c.delta.minutes == 3 && c.delta.sessions == 1)
            .times(1)
            .returning(|_| Ok(()));

        let (mut runner, clock) = runner(sink);
        runner.start_exercise("2").unwrap();

        clock.advance_secs(179);
        runner.pump().unwrap();
        assert!(!runner.catalog().exercise("2").unwrap().completed);

        clock.advance_secs(1);
        runner.pump().unwrap();
        clock.advance_secs(60);
        runner.pump().unwrap();

        assert!(runner.catalog().exercise("2").unwrap().completed);
        assert!(!runner.snapshot().unwrap().running);
    }

    #[test]
    fn test_breathing_never_reaches_sink() {
        let mut sink = MockProgressSink::new();
        sink.expect_record_completion().never();

        let (mut runner, clock) = runner(sink);
        runner.start_pattern("box").unwrap();
        clock.advance_secs(160);
        let events = runner.pump().unwrap();

        assert_eq!(events.len(), 40);
        let snap = runner.snapshot().unwrap();
        assert_eq!(snap.cycles, 10);
        assert_eq!(snap.phase, Some(BreathPhase::Inhale));
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut sink = MockProgressSink::new();
        sink.expect_record_completion()
            .returning(|_| Err(MindwellError::Database("disk full".to_string())));

        let (mut runner, clock) = runner(sink);
        runner.start_exercise_for("1", 2).unwrap();
        clock.advance_secs(2);

        assert!(matches!(runner.pump(), Err(MindwellError::Database(_))));
        assert!(runner.catalog().exercise("1").unwrap().completed);
        assert_eq!(runner.snapshot().unwrap().status, SessionStatus::Completed);
    }

    #[test]
    fn test_unknown_ids() {
        let (mut runner, _clock) = runner(ProgressRecord::default());
        assert!(matches!(
            runner.start_exercise("42"),
            Err(MindwellError::NotFound(_))
        ));
        assert!(matches!(
            runner.start_pattern("nope"),
            Err(MindwellError::NotFound(_))
        ));
    }

    #[test]
    fn test_snapshot_requires_session() {
        let (mut runner, _clock) = runner(ProgressRecord::default());
        assert!(matches!(
            runner.snapshot(),
            Err(MindwellError::NoActiveSession)
        ));

        runner.start_pattern("4-7-8").unwrap();
        assert!(runner.snapshot().is_ok());
        runner.stop();
        assert!(matches!(
            runner.snapshot(),
            Err(MindwellError::NoActiveSession)
        ));
    }

    #[test]
    fn test_toggle_and_reset_without_session_are_silent() {
        let (mut runner, _clock) = runner(ProgressRecord::default());
        assert!(!runner.toggle());
        runner.reset();
    }

    #[test]
    fn test_duration_override_and_record() {
        let (mut runner, clock) = runner(ProgressRecord::default());
        runner.start_exercise_for("3", 120).unwrap();
        assert_eq!(runner.snapshot().unwrap().total_secs, 120);
        assert_eq!(runner.catalog().exercise("3").unwrap().duration_secs, 600);

        clock.advance_secs(120);
        runner.pump().unwrap();

        let (record, catalog) = runner.into_parts();
        assert_eq!(record.total_sessions, 1);
        assert_eq!(record.total_minutes, 2);
        assert!(catalog.exercise("3").unwrap().completed);
    }

    #[test]
    fn test_outcome_collects_completions_and_cycles() {
        let (mut runner, clock) = runner(ProgressRecord::default());
        let mut outcome = RunOutcome::default();

        runner.start_pattern("4-2-6").unwrap();
        clock.advance_secs(24);
        outcome.absorb(&runner.pump().unwrap());
        assert_eq!(outcome.cycles, 2);

        runner.start_exercise_for("1", 5).unwrap();
        clock.advance_secs(5);
        outcome.absorb(&runner.pump().unwrap());

        assert_eq!(outcome.completions.len(), 1);
        assert_eq!(outcome.completions[0].exercise_id, "1");
        assert_eq!(outcome.cycles, 2);
    }
}
