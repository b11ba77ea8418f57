//! Output formatting: colors, the summary table, JSON.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::ColorMode;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Busy,
    Muted,
}

/// Paint `text` in `tone`, or return it unchanged when color is off.
pub fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match tone {
        Tone::Good => text.green().to_string(),
        Tone::Bad => text.red().bold().to_string(),
        Tone::Busy => text.yellow().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

// ── Summary table ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Window")]
    pub window: String,
    #[tabled(rename = "Ping (ms)")]
    pub ping: String,
    #[tabled(rename = "Download (Mb/s)")]
    pub download: String,
    #[tabled(rename = "Upload (Mb/s)")]
    pub upload: String,
    #[tabled(rename = "Downtime (min)")]
    pub downtime: String,
}

/// Label for a summary window given in days.
pub fn window_label(days: &str) -> String {
    match days {
        "1" => "1 day".into(),
        other => format!("{other} days"),
    }
}

pub fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.2}"))
}

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Printing ─────────────────────────────────────────────────────────

/// Pretty-printed JSON.
pub fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Print a line to stdout, ignoring broken pipes.
pub fn print_line(line: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_render_with_two_decimals() {
        assert_eq!(format_metric(Some(12.3456)), "12.35");
        assert_eq!(format_metric(None), "-");
    }

    #[test]
    fn window_labels_pluralize() {
        assert_eq!(window_label("1"), "1 day");
        assert_eq!(window_label("30"), "30 days");
    }

    #[test]
    fn paint_is_identity_without_color() {
        assert_eq!(paint("ERROR: x", Tone::Bad, false), "ERROR: x");
        assert_ne!(paint("ok", Tone::Good, true), "ok");
    }

    #[test]
    fn table_has_headers() {
        let rows = vec![SummaryRow {
            window: window_label("1"),
            ping: format_metric(Some(10.0)),
            ..SummaryRow::default()
        }];
        let table = render_table(&rows);
        assert!(table.contains("Ping (ms)"));
        assert!(table.contains("10.00"));
    }
}
