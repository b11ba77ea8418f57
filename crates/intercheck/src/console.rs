//! Terminal `UiAdapter`.
//!
//! The engine re-renders every status poll; the console only prints what
//! changed since the last render so the watch log stays readable.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use intercheck_core::{SettingValue, StatusTag, SummaryMetric, UiAdapter};

use crate::output::{self, SummaryRow, Tone, paint};

pub struct ConsoleUi {
    color: bool,
    /// One-shot JSON mode prints nothing here.
    enabled: bool,
    state: Mutex<ConsoleState>,
}

#[derive(Debug, Default)]
struct ConsoleState {
    status_message: Option<(String, bool)>,
    indicators: BTreeMap<StatusTag, bool>,
    summary: BTreeMap<String, HashMap<SummaryMetric, f64>>,
    interval_label: String,
}

impl ConsoleUi {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            enabled: true,
            state: Mutex::new(ConsoleState::default()),
        }
    }

    pub fn silent() -> Self {
        Self {
            enabled: false,
            ..Self::new(false)
        }
    }

    fn emit(&self, line: &str) {
        if self.enabled {
            output::print_line(line);
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    fn summary_rows(state: &ConsoleState) -> Vec<SummaryRow> {
        let mut windows: Vec<&String> = state.summary.keys().collect();
        windows.sort_by_key(|w| (w.parse::<u64>().unwrap_or(u64::MAX), w.as_str()));
        windows
            .into_iter()
            .map(|window| {
                let metrics = &state.summary[window];
                let value = |m: SummaryMetric| output::format_metric(metrics.get(&m).copied());
                SummaryRow {
                    window: output::window_label(window),
                    ping: value(SummaryMetric::Ping),
                    download: value(SummaryMetric::Download),
                    upload: value(SummaryMetric::Upload),
                    downtime: value(SummaryMetric::Downtime),
                }
            })
            .collect()
    }
}

impl UiAdapter for ConsoleUi {
    fn set_indicator_active(&self, tag: StatusTag, active: bool) {
        let changed = self.with_state(|s| s.indicators.insert(tag, active) != Some(active));
        if changed {
            let line = if active {
                paint(&format!("  ● {tag}"), Tone::Good, self.color)
            } else {
                paint(&format!("  ○ {tag}"), Tone::Muted, self.color)
            };
            self.emit(&line);
        }
    }

    fn set_status_message(&self, text: &str, is_error: bool) {
        let next = Some((text.to_owned(), is_error));
        let changed = self.with_state(|s| {
            let changed = s.status_message != next;
            s.status_message = next;
            changed
        });
        if !changed {
            return;
        }
        if is_error {
            self.emit(&paint(&format!("ERROR: {text}"), Tone::Bad, self.color));
        } else {
            self.emit(&paint(text, Tone::Good, self.color));
        }
    }

    fn set_forcing_affordance(&self, forcing: bool) {
        if forcing {
            self.emit(&paint("Forcing SpeedTest...", Tone::Busy, self.color));
        } else {
            self.emit(&paint("Forced SpeedTest finished", Tone::Good, self.color));
        }
    }

    fn set_summary_metric(&self, interval: &str, metric: SummaryMetric, value: f64) {
        self.with_state(|s| {
            s.summary
                .entry(interval.to_owned())
                .or_default()
                .insert(metric, value);
        });
    }

    fn set_summary_interval_label(&self, label: &str) {
        self.with_state(|s| s.interval_label = label.to_owned());
    }

    fn set_summary_updated_timestamp(&self, text: &str) {
        // Last call of a summary render: flush the collected snapshot.
        let (rows, label) = self.with_state(|s| {
            let rows = Self::summary_rows(s);
            s.summary.clear();
            (rows, std::mem::take(&mut s.interval_label))
        });
        self.emit(&output::render_table(&rows));
        self.emit(&paint(
            &format!("Records span {label} days. Last updated {text}"),
            Tone::Muted,
            self.color,
        ));
    }

    fn show_summary_error(&self, text: &str) {
        self.with_state(|s| {
            s.summary.clear();
            s.interval_label.clear();
        });
        self.emit(&paint(text, Tone::Bad, self.color));
    }

    fn set_settings_message(&self, text: &str) {
        // An empty message only clears; a terminal log has nothing to erase.
        if text.is_empty() {
            return;
        }
        let tone = if text.starts_with("ERROR") {
            Tone::Bad
        } else {
            Tone::Good
        };
        self.emit(&paint(text, tone, self.color));
    }

    fn set_field_value(&self, field: &str, value: &SettingValue) {
        self.emit(&format!("{field} = {value}"));
    }
}
