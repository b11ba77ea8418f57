//! Configuration for Intercheck dashboard clients.
//!
//! Layered loading (defaults, then `config.toml`, then `INTERCHECK_*`
//! environment variables) and translation to
//! `intercheck_core::DashboardConfig`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use intercheck_core::{DashboardConfig, FieldSpec, SettingKind};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Server root URL.
    #[serde(default = "default_server")]
    pub server: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_status_interval")]
    pub status_interval_ms: u64,

    #[serde(default = "default_summary_interval")]
    pub summary_interval_ms: u64,

    /// Status poll delay after a force request is accepted.
    #[serde(default = "default_force_poll")]
    pub force_poll_ms: u64,

    /// How long "Updated" stays visible after a settings change.
    #[serde(default = "default_settings_ack")]
    pub settings_ack_ms: u64,

    /// Settings fields managed by the dashboard.
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout_secs: default_timeout(),
            status_interval_ms: default_status_interval(),
            summary_interval_ms: default_summary_interval(),
            force_poll_ms: default_force_poll(),
            settings_ack_ms: default_settings_ack(),
            fields: default_fields(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldConfig {
    pub name: String,
    pub kind: SettingKind,
}

fn default_server() -> String {
    "http://127.0.0.1:5000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_status_interval() -> u64 {
    duration_ms(intercheck_core::config::DEFAULT_STATUS_INTERVAL)
}
fn default_summary_interval() -> u64 {
    duration_ms(intercheck_core::config::DEFAULT_SUMMARY_INTERVAL)
}
fn default_force_poll() -> u64 {
    duration_ms(intercheck_core::config::DEFAULT_FORCE_POLL_INTERVAL)
}
fn default_settings_ack() -> u64 {
    duration_ms(intercheck_core::config::DEFAULT_SETTINGS_ACK_DISPLAY)
}
fn default_fields() -> Vec<FieldConfig> {
    intercheck_core::default_fields()
        .into_iter()
        .map(|spec| FieldConfig {
            name: spec.name,
            kind: spec.kind,
        })
        .collect()
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "intercheck", "intercheck").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("intercheck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is
/// not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("INTERCHECK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Validate and build the engine configuration.
pub fn to_dashboard_config(cfg: &Config) -> Result<DashboardConfig, ConfigError> {
    let url: url::Url = cfg
        .server
        .parse()
        .map_err(|e| ConfigError::validation("server", format!("invalid URL '{}': {e}", cfg.server)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::validation(
            "server",
            format!("expected an http or https URL, got '{}'", cfg.server),
        ));
    }

    let non_zero = |field: &str, value: u64| {
        if value == 0 {
            Err(ConfigError::validation(field, "must be greater than zero"))
        } else {
            Ok(value)
        }
    };

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(cfg.fields.len());
    for field in &cfg.fields {
        if field.name.trim().is_empty() {
            return Err(ConfigError::validation("fields", "field name is empty"));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ConfigError::validation(
                "fields",
                format!("duplicate field '{}'", field.name),
            ));
        }
        fields.push(FieldSpec::new(field.name.clone(), field.kind));
    }

    Ok(DashboardConfig {
        url,
        timeout: Duration::from_secs(non_zero("timeout_secs", cfg.timeout_secs)?),
        status_interval: Duration::from_millis(non_zero(
            "status_interval_ms",
            cfg.status_interval_ms,
        )?),
        summary_interval: Duration::from_millis(non_zero(
            "summary_interval_ms",
            cfg.summary_interval_ms,
        )?),
        force_poll_interval: Duration::from_millis(non_zero("force_poll_ms", cfg.force_poll_ms)?),
        settings_ack_display: Duration::from_millis(cfg.settings_ack_ms),
        fields,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::result_large_err)]

    use figment::Jail;

    use super::*;

    fn load(jail_file: &str) -> Result<Config, figment::Error> {
        load_config_from(Path::new(jail_file)).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = load("config.toml")?;
            assert_eq!(config, Config::default());
            assert_eq!(config.server, "http://127.0.0.1:5000");
            assert_eq!(config.status_interval_ms, 5_000);
            assert_eq!(config.summary_interval_ms, 3_600_000);
            assert_eq!(config.fields.len(), 2);
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                server = "http://speedbox.local:5000"
                status_interval_ms = 1000

                [[fields]]
                name = "intercheck-settings-interval"
                kind = "scalar"
                "#,
            )?;

            let config = load("config.toml")?;
            assert_eq!(config.server, "http://speedbox.local:5000");
            assert_eq!(config.status_interval_ms, 1_000);
            assert_eq!(config.summary_interval_ms, 3_600_000);
            assert_eq!(config.fields.len(), 1);
            assert_eq!(config.fields[0].kind, SettingKind::Scalar);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "timeout_secs = 10")?;
            jail.set_env("INTERCHECK_TIMEOUT_SECS", "3");
            jail.set_env("INTERCHECK_SERVER", "http://10.0.0.2:5000");

            let config = load("config.toml")?;
            assert_eq!(config.timeout_secs, 3);
            assert_eq!(config.server, "http://10.0.0.2:5000");
            Ok(())
        });
    }

    #[test]
    fn dashboard_config_carries_durations() {
        let dashboard = to_dashboard_config(&Config::default()).unwrap();
        assert_eq!(dashboard.url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(dashboard.timeout, Duration::from_secs(30));
        assert_eq!(dashboard.status_interval, Duration::from_secs(5));
        assert_eq!(dashboard.summary_interval, Duration::from_secs(3600));
        assert_eq!(dashboard.force_poll_interval, Duration::from_secs(2));
        assert_eq!(dashboard.settings_ack_display, Duration::from_secs(5));
        assert_eq!(dashboard.fields, intercheck_core::default_fields());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = Config {
            server: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            to_dashboard_config(&bad_url),
            Err(ConfigError::Validation { ref field, .. }) if field == "server"
        ));

        let zero = Config {
            status_interval_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            to_dashboard_config(&zero),
            Err(ConfigError::Validation { ref field, .. }) if field == "status_interval_ms"
        ));

        let mut duplicate = Config::default();
        duplicate.fields.push(duplicate.fields[0].clone());
        assert!(matches!(
            to_dashboard_config(&duplicate),
            Err(ConfigError::Validation { ref field, .. }) if field == "fields"
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            server: "https://intercheck.example:8443".into(),
            force_poll_ms: 500,
            ..Config::default()
        };

        save_config_to(&config, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[[fields]]"));

        let loaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }
}
