//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use intercheck_config::ConfigError;
use intercheck_core::{CoreError, ForceRefusal};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Cannot connect to Intercheck at {url}")]
    #[diagnostic(
        code(intercheck::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Set the address with --server or INTERCHECK_SERVER."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(intercheck::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    #[error("Unexpected response from Intercheck: {message}")]
    #[diagnostic(
        code(intercheck::invalid_response),
        help("Is --server pointing at an Intercheck server?")
    )]
    InvalidResponse { message: String },

    // ── Force ────────────────────────────────────────────────────────
    #[error("Intercheck could not force a SpeedTest")]
    #[diagnostic(code(intercheck::force_rejected))]
    ForceRejected,

    #[error("Force request not sent: {reason}")]
    #[diagnostic(
        code(intercheck::force_refused),
        help("Wait for the current speed test to finish, then try again.")
    )]
    ForceRefused { reason: ForceRefusal },

    // ── Settings ─────────────────────────────────────────────────────
    #[error("Unknown settings field '{name}'")]
    #[diagnostic(
        code(intercheck::unknown_field),
        help("Configured fields: {available}")
    )]
    UnknownField { name: String, available: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(intercheck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Could not load configuration")]
    #[diagnostic(
        code(intercheck::config),
        help("Check {path}, or recreate it with: intercheck config init --force")
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(intercheck::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render config: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout | Self::InvalidResponse { .. } => {
                exit_code::CONNECTION
            }
            Self::ForceRejected | Self::ForceRefused { .. } => exit_code::REJECTED,
            Self::UnknownField { .. } | Self::Validation { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config {
                path: intercheck_config::config_path().display().to_string(),
                source: other,
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::InvalidResponse { message } => CliError::InvalidResponse { message },

            CoreError::UnknownField { name } => CliError::UnknownField {
                name,
                available: String::new(),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "server".into(),
                reason: message,
            },
        }
    }
}
