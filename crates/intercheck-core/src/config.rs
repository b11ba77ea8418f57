// ── Runtime dashboard configuration ──
//
// Describes where the server is and how fast each loop runs. Front ends
// build a `DashboardConfig` (usually via `intercheck-config`) and hand it
// in; core never reads files.

use std::time::Duration;

use url::Url;

use crate::model::SettingKind;

pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_millis(5_000);
pub const DEFAULT_SUMMARY_INTERVAL: Duration = Duration::from_millis(3_600_000);
/// Twice the server's own force-file check interval.
pub const DEFAULT_FORCE_POLL_INTERVAL: Duration = Duration::from_millis(2_000);
pub const DEFAULT_SETTINGS_ACK_DISPLAY: Duration = Duration::from_millis(5_000);

/// A settings field the dashboard manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: SettingKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: SettingKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Fields exposed by a stock Intercheck server.
pub fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("intercheck-settings-interval", SettingKind::Scalar),
        FieldSpec::new("intercheck-settings-interval-exact", SettingKind::Boolean),
    ]
}

/// Configuration for one dashboard engine.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Server root (e.g. `http://127.0.0.1:5000`).
    pub url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Normal status poll cadence.
    pub status_interval: Duration,
    /// Summary refresh cadence.
    pub summary_interval: Duration,
    /// Status poll delay after a force request is accepted.
    pub force_poll_interval: Duration,
    /// How long the settings "Updated" acknowledgment stays visible.
    pub settings_ack_display: Duration,
    pub fields: Vec<FieldSpec>,
}

impl DashboardConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(30),
            status_interval: DEFAULT_STATUS_INTERVAL,
            summary_interval: DEFAULT_SUMMARY_INTERVAL,
            force_poll_interval: DEFAULT_FORCE_POLL_INTERVAL,
            settings_ack_display: DEFAULT_SETTINGS_ACK_DISPLAY,
            fields: default_fields(),
        }
    }
}
