use colored::Colorize;

use crate::features::appointments::TimeSlot;
use crate::features::catalog::CompletionSummary;
use crate::features::mood::{MoodEntry, MoodLevel, MoodStats};
use crate::features::progress::{Completion, PracticeSession, ProgressRecord};
use crate::features::timer::{
    format_length, format_mmss, render_progress_bar, BreathingPattern, Difficulty, Exercise,
    SessionStatus, TimerSnapshot,
};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn difficulty_badge(difficulty: Difficulty) -> colored::ColoredString {
    match difficulty {
        Difficulty::Beginner => difficulty.to_string().green(),
        Difficulty::Intermediate => difficulty.to_string().yellow(),
        Difficulty::Advanced => difficulty.to_string().red(),
    }
}

/// Format the catalog as pretty output
pub fn format_catalog_pretty(
    exercises: &[&Exercise],
    patterns: &[BreathingPattern],
    summary: &CompletionSummary,
) -> String {
    let mut output = format!("Exercises ({})\n", exercises.len());
    output.push_str(&rule());
    output.push('\n');

    if exercises.is_empty() {
        output.push_str("  No exercises\n");
    }

    for exercise in exercises {
        let icon = if exercise.completed {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let star = if exercise.favorite { " ★".yellow().to_string() } else { String::new() };

        output.push_str(&format!(
            "{} {:>3}  {}{}  {}  {}  {}\n",
            icon,
            exercise.id.dimmed(),
            exercise.title.bold(),
            star,
            format_length(u64::from(exercise.duration_secs)).cyan(),
            exercise.kind.to_string().dimmed(),
            difficulty_badge(exercise.difficulty),
        ));
    }

    output.push('\n');
    output.push_str(&format!("Breathing patterns ({})\n", patterns.len()));
    output.push_str(&rule());
    output.push('\n');

    for pattern in patterns {
        output.push_str(&format!(
            "  {:<10} {:<28} {}  {}\n",
            pattern.id.cyan(),
            pattern.name.bold(),
            pattern.label(),
            format!("{}s/cycle", pattern.cycle_secs()).dimmed(),
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Completed {}/{} ({:.0}%), {} of practice\n",
        summary.completed,
        summary.total,
        summary.rate_percent,
        format_length(summary.completed_minutes.saturating_mul(60))
    ));

    output
}

/// Format the progress record as pretty output
pub fn format_progress_pretty(record: &ProgressRecord, weekly_goal: u32) -> String {
    let percent = record.weekly_goal_percent(weekly_goal);

    let mut output = format!("{}\n", "Practice progress".bold());
    output.push_str(&rule());
    output.push('\n');
    output.push_str(&format!(
        "  {:<16} {}\n",
        "Sessions".dimmed(),
        record.total_sessions
    ));
    output.push_str(&format!(
        "  {:<16} {}\n",
        "Minutes".dimmed(),
        record.total_minutes
    ));
    output.push_str(&format!(
        "  {:<16} {} {}\n",
        "Streak".dimmed(),
        record.current_streak,
        if record.current_streak == 1 { "day" } else { "days" }
    ));
    output.push_str(&format!(
        "  {:<16} {}/{}  {} {:.0}%\n",
        "This week".dimmed(),
        record.weekly_progress,
        weekly_goal,
        render_progress_bar(percent, 20).green(),
        percent
    ));

    output
}

/// Format completed session history as pretty output
pub fn format_history_pretty(sessions: &[PracticeSession]) -> String {
    if sessions.is_empty() {
        return "History (0)\n  No completed sessions yet".to_string();
    }

    let mut output = format!("History ({})\n", sessions.len());
    output.push_str(&rule());
    output.push('\n');

    for session in sessions {
        output.push_str(&format!(
            "  {}  {}  {}\n",
            session
                .completed_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            session.title.bold(),
            format_length(u64::from(session.duration_secs)).cyan()
        ));
    }

    output
}

fn mood_colored(level: MoodLevel) -> colored::ColoredString {
    match level {
        MoodLevel::VeryLow => level.label().red(),
        MoodLevel::Low => level.label().yellow(),
        MoodLevel::Neutral => level.label().white(),
        MoodLevel::Good => level.label().green(),
        MoodLevel::VeryGood => level.label().bright_green(),
    }
}

/// Format a single mood entry as pretty output
pub fn format_mood_pretty(entry: &MoodEntry) -> String {
    let mut line = format!(
        "{} {}  {}",
        entry.mood.emoji(),
        mood_colored(entry.mood).bold(),
        entry
            .recorded_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
    );

    if !entry.note.is_empty() {
        line.push_str(&format!("\n    {}", entry.note));
    }

    if !entry.tags.is_empty() {
        let tags = entry
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        line.push_str(&format!("\n    {}", tags.cyan()));
    }

    line
}

/// Format mood entries as pretty output
pub fn format_moods_pretty(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return "Moods (0)\n  Nothing logged yet".to_string();
    }

    let mut output = format!("Moods ({})\n", entries.len());
    output.push_str(&rule());
    output.push('\n');

    for entry in entries {
        output.push_str(&format_mood_pretty(entry));
        output.push('\n');
    }

    output
}

/// Format mood statistics as pretty output
pub fn format_mood_stats_pretty(stats: &MoodStats) -> String {
    let mut output = format!("{}\n", "Mood statistics".bold());
    output.push_str(&rule());
    output.push('\n');

    output.push_str(&format!(
        "  {:<12} {}\n",
        "Entries".dimmed(),
        stats.total_entries
    ));
    match stats.average {
        Some(avg) => output.push_str(&format!("  {:<12} {avg:.1} / 5\n", "Average".dimmed())),
        None => output.push_str(&format!("  {:<12} -\n", "Average".dimmed())),
    }
    output.push_str(&format!(
        "  {:<12} {} {}\n",
        "Streak".dimmed(),
        stats.streak,
        if stats.streak == 1 { "day" } else { "days" }
    ));
    match stats.today {
        Some(level) => output.push_str(&format!(
            "  {:<12} {} {}\n",
            "Today".dimmed(),
            level.emoji(),
            mood_colored(level)
        )),
        None => output.push_str(&format!("  {:<12} not logged\n", "Today".dimmed())),
    }

    if stats.total_entries > 0 {
        output.push('\n');
        for level in MoodLevel::ALL.iter().rev() {
            let count = stats.counts.get(level).copied().unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let percent = count as f64 / stats.total_entries as f64 * 100.0;
            output.push_str(&format!(
                "  {} {:<10} {:>3}  {}\n",
                level.emoji(),
                level.label(),
                count,
                render_progress_bar(percent, 20).dimmed()
            ));
        }
    }

    output
}

/// Format appointment slots grouped by day
pub fn format_slots_pretty(doctor_id: &str, slots: &[&TimeSlot]) -> String {
    if slots.is_empty() {
        return format!("Slots for doctor {doctor_id} (0)\n  No open slots");
    }

    let mut output = format!("Slots for doctor {} ({})\n", doctor_id, slots.len());
    output.push_str(&rule());

    let mut current_day = None;
    for slot in slots {
        if current_day != Some(slot.date) {
            current_day = Some(slot.date);
            output.push('\n');
            output.push_str(&format!("{}\n ", slot.date.format("%a %Y-%m-%d").to_string().bold()));
        }
        let time = slot.start.format("%H:%M").to_string();
        if slot.available {
            output.push_str(&format!(" {}", time.green()));
        } else {
            output.push_str(&format!(" {}", time.dimmed().strikethrough()));
        }
    }
    output.push('\n');

    output
}

/// One status line for a running session
pub fn format_snapshot_pretty(snapshot: &TimerSnapshot) -> String {
    let status = match snapshot.status {
        SessionStatus::Running => "▶".green(),
        SessionStatus::Paused => "⏸".yellow(),
        SessionStatus::Completed => "✓".green(),
    };

    let mut line = format!(
        "{} {}  {}  {}",
        status,
        snapshot.title.bold(),
        format_mmss(snapshot.remaining_secs).cyan(),
        render_progress_bar(snapshot.progress_percent, 20)
    );

    if let Some(phase) = snapshot.phase {
        line.push_str(&format!(
            "  {}  {}",
            phase.instruction().bold(),
            format!("cycle {}", snapshot.cycles + 1).dimmed()
        ));
    }

    line
}

/// Line printed when an exercise finishes
pub fn format_completion_pretty(completion: &Completion) -> String {
    format!(
        "{} Completed {} ({}), +{} min",
        "✓".green(),
        completion.title.bold(),
        format_length(u64::from(completion.duration_secs)),
        completion.delta.minutes
    )
}
