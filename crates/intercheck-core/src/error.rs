// ── Core error types ──
//
// User-facing errors from intercheck-core. The engine recovers from all
// of them locally; they are returned so one-shot front ends can pick an
// exit code.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to Intercheck at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Intercheck request timed out")]
    Timeout,

    #[error("Unexpected response from Intercheck: {message}")]
    InvalidResponse { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Unknown settings field: {name}")]
    UnknownField { name: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` for failures that mean the server could not be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout | Self::InvalidResponse { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<intercheck_api::Error> for CoreError {
    fn from(err: intercheck_api::Error) -> Self {
        if err.is_timeout() {
            return CoreError::Timeout;
        }
        match err {
            intercheck_api::Error::Transport(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            intercheck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            intercheck_api::Error::ClientBuild(message) => CoreError::Config { message },
            intercheck_api::Error::Status { status, path } => CoreError::ConnectionFailed {
                url: path,
                reason: format!("HTTP {status}"),
            },
            intercheck_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
