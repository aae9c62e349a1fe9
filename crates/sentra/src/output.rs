//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use sentra_core::{Activity, DailyStat, Severity};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Severity label, colored when enabled.
pub fn severity_label(severity: Severity, color: bool) -> String {
    if !color {
        return severity.to_string();
    }
    match severity {
        Severity::High => severity.to_string().red().bold().to_string(),
        Severity::Medium => severity.to_string().yellow().to_string(),
        Severity::Low => severity.to_string().green().to_string(),
        Severity::Unknown => severity.to_string().dimmed().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        serde_json::to_string(data).expect("serialization should not fail")
    } else {
        serde_json::to_string_pretty(data).expect("serialization should not fail")
    }
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

// ── Row types ────────────────────────────────────────────────────────

/// Table row for an activity listing.
#[derive(Tabled)]
pub struct ActivityRow {
    #[tabled(rename = "TIME")]
    pub time: String,
    #[tabled(rename = "SEVERITY")]
    pub severity: String,
    #[tabled(rename = "SCORE")]
    pub score: String,
    #[tabled(rename = "SOURCE")]
    pub source: String,
    #[tabled(rename = "MESSAGE")]
    pub message: String,
}

impl ActivityRow {
    pub fn from_activity(activity: &Activity, color: bool) -> Self {
        Self {
            time: short_time(&activity.timestamp),
            severity: severity_label(activity.status, color),
            score: format!("{:.1}", activity.threat_score),
            source: activity.source.clone(),
            message: truncate(&activity.message, 60),
        }
    }
}

/// Table row for the daily stats breakdown.
#[derive(Tabled)]
pub struct DailyRow {
    #[tabled(rename = "DATE")]
    pub date: String,
    #[tabled(rename = "HIGH")]
    pub high: u64,
    #[tabled(rename = "MEDIUM")]
    pub medium: u64,
    #[tabled(rename = "LOW")]
    pub low: u64,
    #[tabled(rename = "LOGS")]
    pub logs: u64,
}

impl From<&DailyStat> for DailyRow {
    fn from(day: &DailyStat) -> Self {
        Self {
            date: day.date.clone(),
            high: day.high_threats,
            medium: day.medium_threats,
            low: day.low_threats,
            logs: day.total_logs,
        }
    }
}

/// Trim an ISO-8601 timestamp down to `MM-DD HH:MM:SS` for table display.
fn short_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.to_owned(),
        |dt| dt.format("%m-%d %H:%M:%S").to_string(),
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_time_formats_rfc3339() {
        assert_eq!(
            short_time("2025-06-15T10:30:00-06:00"),
            "06-15 10:30:00"
        );
    }

    #[test]
    fn short_time_passes_through_garbage() {
        assert_eq!(short_time("not-a-date"), "not-a-date");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_cuts_long_strings() {
        let long = "x".repeat(100);
        let cut = truncate(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
