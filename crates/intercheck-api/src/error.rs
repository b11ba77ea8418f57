use thiserror::Error;

/// Top-level error type for the `intercheck-api` crate.
///
/// Covers every failure mode of a round-trip to the Intercheck server.
/// `intercheck-core` recovers from all of them locally; none of them are
/// allowed to stop a polling loop.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Server ──────────────────────────────────────────────────────
    /// The server answered with a non-success HTTP status.
    #[error("Intercheck returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the error means "the server could not be reached
    /// or did not answer sensibly".
    ///
    /// Malformed bodies count as connectivity failures: the caller cannot
    /// tell a half-written response from a dead server.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Deserialization { .. }
        )
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
