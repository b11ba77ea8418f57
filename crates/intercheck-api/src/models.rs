// Wire types for the Intercheck JSON endpoints.
//
// Only the fields the dashboard consumes are modelled. Every response
// also carries the server's `version`, which is kept when present.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// `GET /status/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    /// Raw status tags (`init`, `waiting`, `testing`, ...).
    pub status: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// `GET /force/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForceResponse {
    /// Whether the server managed to schedule a speed test.
    pub status: bool,
    #[serde(default)]
    pub version: Option<String>,
}

/// `GET /summary/`
///
/// `stats` maps an interval in days (`"1"`, `"30"`) to named metric
/// series. The server currently sends `[average, deviation]` pairs; only
/// the head of each series is meaningful to the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SummaryResponse {
    pub stats: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
    #[serde(deserialize_with = "interval_label")]
    pub interval: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// `PUT /settings/`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SettingsResponse {
    /// The value the server put into effect. Its JSON type depends on
    /// the field: a bool for checkboxes, a number or string otherwise.
    pub accepted: serde_json::Value,
    #[serde(default)]
    pub version: Option<String>,
}

/// The server reports the record span as a number of days; older builds
/// sent a preformatted string.
fn interval_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for interval, got {other}"
        ))),
    }
}
