// intercheck-api: Async Rust client for the Intercheck dashboard endpoints

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use client::IntercheckClient;
pub use endpoints::LogFormat;
pub use error::Error;
pub use models::{ForceResponse, SettingsResponse, StatusResponse, SummaryResponse};
pub use transport::TransportConfig;
