//! Countdown formatting and duration parsing.

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format seconds as a human-readable length.
#[must_use]
pub fn format_length(secs: u64) -> String {
    fn plural(n: u64, unit: &str) -> String {
        format!("{n} {unit}{}", if n == 1 { "" } else { "s" })
    }

    let minutes = secs / 60;
    if minutes < 1 {
        return plural(secs, "second");
    }

    let hours = minutes / 60;
    let minutes = minutes % 60;
    match (hours, minutes) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{}, {}", plural(h, "hour"), plural(m, "minute")),
    }
}

/// Parse a duration string like "5m", "1m30s" or "90s" into seconds.
///
/// A bare number means minutes.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u32>() {
        return minutes.checked_mul(60).filter(|secs| *secs > 0);
    }

    let mut total: u32 = 0;
    let mut current = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current.push(c);
            continue;
        }
        if current.is_empty() {
            return None;
        }
        let num: u32 = current.parse().ok()?;
        current.clear();
        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(num.checked_mul(unit)?)?;
    }

    if !current.is_empty() {
        let num: u32 = current.parse().ok()?;
        total = total.checked_add(num.checked_mul(60)?)?;
    }

    (total > 0).then_some(total)
}

/// Render a text progress bar for a percentage in `0..=100`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(600), "10:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(0), "00:00");
    }

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(45), "45 seconds");
        assert_eq!(format_length(60), "1 minute");
        assert_eq!(format_length(900), "15 minutes");
        assert_eq!(format_length(7200), "2 hours");
        assert_eq!(format_length(5400), "1 hour, 30 minutes");
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("5"), Some(300));
        assert_eq!(parse_duration("5m"), Some(300));
    }

    #[test]
    fn test_parse_duration_mixed() {
        assert_eq!(parse_duration("1m30s"), Some(90));
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("1h"), Some(3600));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("10x").is_none());
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(50.0, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(150.0, 4), "[████]");
    }
}
