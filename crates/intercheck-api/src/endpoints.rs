// Intercheck endpoints
//
// Status, force, summary, settings, and log downloads. Each method maps
// to exactly one HTTP round-trip.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::client::IntercheckClient;
use crate::error::Error;
use crate::models::{ForceResponse, SettingsResponse, StatusResponse, SummaryResponse};

/// Formats the speed-test log can be downloaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Csv,
    Json,
}

impl LogFormat {
    fn path(self) -> &'static str {
        match self {
            Self::Csv => "download/log.csv",
            Self::Json => "download/log.json",
        }
    }

    /// File name the server suggests for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "log.csv",
            Self::Json => "log.json",
        }
    }
}

impl IntercheckClient {
    /// Fetch the current connectivity / test-phase tags.
    ///
    /// `GET /status/`
    pub async fn get_status(&self) -> Result<StatusResponse, Error> {
        let url = self.endpoint_url("status/")?;
        debug!("fetching status");
        self.get_json(url).await
    }

    /// Ask the server to run a speed test as soon as possible.
    ///
    /// `GET /force/` -- `status` in the response tells whether the request
    /// was scheduled.
    pub async fn force_test(&self) -> Result<ForceResponse, Error> {
        let url = self.endpoint_url("force/")?;
        debug!("forcing speed test");
        self.get_json(url).await
    }

    /// Fetch the aggregate statistics over the daily and monthly windows.
    ///
    /// `GET /summary/`
    pub async fn get_summary(&self) -> Result<SummaryResponse, Error> {
        let url = self.endpoint_url("summary/")?;
        debug!("fetching summary");
        self.get_json(url).await
    }

    /// Submit a single settings field.
    ///
    /// `PUT /settings/` with `{name: value}`. Only one field is ever sent
    /// per request; the response carries the value the server accepted.
    ///
    /// The body is JSON. Older Flask builds of the server read the field
    /// from form data instead (checkboxes as the strings `"true"` and
    /// `"false"`) and never set `accepted` for a JSON body; against those
    /// builds this call fails with `Error::Status`.
    pub async fn put_setting(
        &self,
        name: &str,
        value: &impl Serialize,
    ) -> Result<SettingsResponse, Error> {
        let url = self.endpoint_url("settings/")?;
        debug!(field = name, "updating setting");
        let body = BTreeMap::from([(name, value)]);
        self.put_json(url, &body).await
    }

    /// Download the raw speed-test log.
    ///
    /// `GET /download/log.csv` or `GET /download/log.json`
    pub async fn download_log(&self, format: LogFormat) -> Result<Vec<u8>, Error> {
        let url = self.endpoint_url(format.path())?;
        debug!(?format, "downloading log");
        self.get_bytes(url).await
    }
}
