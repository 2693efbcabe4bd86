use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub fn success(msg: &str) -> String { style(msg).green().to_string() }
pub fn warn(msg: &str) -> String { style(msg).yellow().to_string() }

/// Steadily ticking `{spinner} {msg}` spinner.
pub fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_message(msg);
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Local wall-clock label (`HH:MM:SS`) for a message timestamp.
///
/// Accepts RFC 3339 as well as the zone-less `YYYY-MM-DD HH:MM:SS` form the
/// backend's database emits, which is UTC.
pub fn time_label(timestamp: &str) -> Option<String> {
    let ts = timestamp.trim();
    let utc = DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S%.f").map(|n| n.and_utc()))
        .ok()?;
    Some(utc.with_timezone(&Local).format("%H:%M:%S").to_string())
}
