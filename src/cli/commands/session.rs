//! Practice session commands: `start`, `breathe` and `tui`.
//!
//! Sessions run either in the terminal player or headless, where the
//! countdown is driven in-process and progress is written line by line.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use log::debug;
use serde_json::json;

use super::Context;
use crate::cli::args::{BreatheArgs, OutputFormat, StartArgs};
use crate::error::MindwellError;
use crate::features::progress::{ProgressSink, ProgressStore};
use crate::features::timer::{
    parse_duration, Clock, RunOutcome, SessionRunner, SystemClock, TargetKind, TimerEngine,
    TimerEvent,
};
use crate::output::{format_completion_pretty, format_snapshot_pretty, to_json};
use crate::tui;

/// Cycles a headless breathing session runs when `--cycles` is not given.
pub const DEFAULT_HEADLESS_CYCLES: u32 = 3;

/// When a headless run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopWhen {
    /// The exercise completes
    Completed,
    /// The breathing pattern reaches this many cycles
    Cycles(u32),
}

/// Run a catalog exercise.
///
/// # Errors
///
/// Returns an error for an unknown id, a bad `--duration`, or a storage
/// failure while recording the completion.
pub fn start(ctx: &Context, args: &StartArgs) -> Result<String, MindwellError> {
    let duration = args
        .duration
        .as_deref()
        .map(|d| {
            parse_duration(d).ok_or_else(|| {
                MindwellError::InvalidDuration(format!(
                    "Invalid duration '{d}' (use e.g. 90s, 5m or 1m30s)"
                ))
            })
        })
        .transpose()?;

    let mut runner = runner(ctx)?;
    match duration {
        Some(secs) => runner.start_exercise_for(&args.id, secs)?,
        None => runner.start_exercise(&args.id)?,
    }

    let outcome = if args.headless {
        headless(ctx, &mut runner, StopWhen::Completed)?
    } else {
        tui::run(&mut runner, None)?
    };
    summary(ctx, runner.sink(), &outcome)
}

/// Follow a breathing pattern.
///
/// # Errors
///
/// Returns an error if the pattern cannot be resolved or has no non-zero
/// phase.
pub fn breathe(ctx: &Context, args: &BreatheArgs) -> Result<String, MindwellError> {
    let pattern = args
        .pattern
        .clone()
        .unwrap_or_else(|| ctx.config.practice.default_pattern.clone());

    let mut runner = runner(ctx)?;
    runner.start_pattern(&pattern)?;

    let outcome = if args.headless {
        let cycles = args.cycles.unwrap_or(DEFAULT_HEADLESS_CYCLES).max(1);
        headless(ctx, &mut runner, StopWhen::Cycles(cycles))?
    } else {
        tui::run(&mut runner, args.cycles)?
    };
    summary(ctx, runner.sink(), &outcome)
}

/// Browse the catalog in the terminal player.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or storage fails.
pub fn browse(ctx: &Context) -> Result<String, MindwellError> {
    let mut runner = runner(ctx)?;
    let outcome = tui::run(&mut runner, None)?;
    summary(ctx, runner.sink(), &outcome)
}

fn runner(ctx: &Context) -> Result<SessionRunner<SystemClock, ProgressStore>, MindwellError> {
    let store = ProgressStore::with_database(ctx.database()?);
    let catalog = ctx.catalog(&store)?;
    let interval = Duration::from_millis(ctx.config.practice.tick_interval_ms);
    debug!("tick interval {interval:?}");
    let engine = TimerEngine::with_interval(SystemClock::new(), interval);
    Ok(SessionRunner::new(engine, store, catalog))
}

fn headless(
    ctx: &Context,
    runner: &mut SessionRunner<SystemClock, ProgressStore>,
    stop: StopWhen,
) -> Result<RunOutcome, MindwellError> {
    match ctx.format {
        OutputFormat::Pretty => drive(runner, stop, &mut io::stdout().lock(), std::thread::sleep),
        OutputFormat::Json => drive(runner, stop, &mut io::sink(), std::thread::sleep),
    }
}

/// Drive the active session until `stop` is met, writing progress to `out`.
///
/// `wait` is called with the time left until the next tick is due.
///
/// # Errors
///
/// Returns `MindwellError::NoActiveSession` when nothing was started, or any
/// error from recording a completion or writing to `out`.
pub fn drive<C, S, W>(
    runner: &mut SessionRunner<C, S>,
    stop: StopWhen,
    out: &mut W,
    mut wait: impl FnMut(Duration),
) -> Result<RunOutcome, MindwellError>
where
    C: Clock,
    S: ProgressSink,
    W: Write + ?Sized,
{
    let mut outcome = RunOutcome::default();
    writeln!(out, "{}", format_snapshot_pretty(&runner.snapshot()?))?;

    while let Some(due) = runner.engine().ticker().next_due() {
        let now = runner.engine().clock().now();
        if due > now {
            wait(due - now);
        }

        let events = runner.pump()?;
        outcome.absorb(&events);

        for event in &events {
            if let TimerEvent::PhaseChanged { phase, cycles } = event {
                if let StopWhen::Cycles(limit) = stop {
                    if *cycles >= limit {
                        runner.stop();
                        return Ok(outcome);
                    }
                }
                let secs = runner.snapshot()?.total_secs;
                writeln!(out, "  {:<14} {}", phase.instruction(), format!("{secs}s").dimmed())?;
            }
        }

        let snapshot = runner.snapshot()?;
        if snapshot.kind == TargetKind::Exercise
            && snapshot.running
            && snapshot.remaining_secs % 60 == 0
        {
            writeln!(out, "{}", format_snapshot_pretty(&snapshot))?;
        }
        out.flush()?;
    }

    Ok(outcome)
}

fn summary(
    ctx: &Context,
    store: &ProgressStore,
    outcome: &RunOutcome,
) -> Result<String, MindwellError> {
    let record = store.record()?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "completions": outcome.completions,
            "cycles": outcome.cycles,
            "progress": record,
        })),
        OutputFormat::Pretty => {
            let mut lines: Vec<String> = outcome
                .completions
                .iter()
                .map(format_completion_pretty)
                .collect();
            if outcome.cycles > 0 {
                lines.push(format!(
                    "Breathed {} {}",
                    outcome.cycles,
                    if outcome.cycles == 1 { "cycle" } else { "cycles" }
                ));
            }
            if lines.is_empty() {
                lines.push("Nothing completed this time".dimmed().to_string());
            }
            lines.push(
                format!(
                    "Total: {} sessions, {} minutes",
                    record.total_sessions, record.total_minutes
                )
                .dimmed()
                .to_string(),
            );
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::Catalog;
    use crate::features::progress::ProgressRecord;
    use crate::features::timer::VirtualClock;

    fn runner() -> (SessionRunner<VirtualClock, ProgressRecord>, VirtualClock) {
        let clock = VirtualClock::new();
        let engine = TimerEngine::new(clock.clone());
        (
            SessionRunner::new(engine, ProgressRecord::default(), Catalog::builtin()),
            clock,
        )
    }

    #[test]
    fn test_drive_exercise_to_completion() {
        colored::control::set_override(false);
        let (mut runner, clock) = runner();
        runner.start_exercise_for("2", 125).unwrap();

        let mut out = Vec::new();
        let outcome = drive(&mut runner, StopWhen::Completed, &mut out, |d| clock.advance(d)).unwrap();

        assert_eq!(outcome.completions.len(), 1);
        assert_eq!(outcome.completions[0].delta.minutes, 2);
        assert_eq!(runner.sink().total_sessions, 1);
        assert!(runner.catalog().exercise("2").unwrap().completed);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Mindful Moment"));
        assert!(text.contains("01:00"));
    }

    #[test]
    fn test_drive_breathing_stops_after_cycles() {
        colored::control::set_override(false);
        let (mut runner, clock) = runner();
        runner.start_pattern("box").unwrap();

        let mut out = Vec::new();
        let outcome = drive(&mut runner, StopWhen::Cycles(2), &mut out, |d| clock.advance(d)).unwrap();

        assert_eq!(outcome.cycles, 2);
        assert!(outcome.completions.is_empty());
        assert!(runner.snapshot().is_err());
        assert_eq!(clock.now(), Duration::from_secs(32));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Breathe out").count(), 2);
        assert_eq!(runner.sink().total_sessions, 0);
    }

    #[test]
    fn test_drive_without_session() {
        let (mut runner, _clock) = runner();
        let result = drive(&mut runner, StopWhen::Completed, &mut io::sink(), |_| {});
        assert!(matches!(result, Err(MindwellError::NoActiveSession)));
    }
}
