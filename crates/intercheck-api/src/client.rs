// Intercheck HTTP client
//
// Wraps `reqwest::Client` with base-URL joining and JSON body decoding.
// Endpoint methods live in `endpoints.rs`; this module only knows how to
// move bytes and turn them into typed responses.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for an Intercheck server.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so
/// each polling loop can hold its own copy.
#[derive(Debug, Clone)]
pub struct IntercheckClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IntercheckClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `http://127.0.0.1:5000`). A
    /// path prefix is allowed when the server sits behind a proxy.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// The server base URL (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an endpoint path such as `status/` against the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        parse_json(resp).await
    }

    /// Send a PUT request with a JSON body and decode the JSON response.
    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        parse_json(resp).await
    }

    /// Send a GET request and return the raw body bytes.
    pub(crate) async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = check_status(resp)?;
        let bytes = resp.bytes().await.map_err(Error::Transport)?;
        Ok(bytes.to_vec())
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::Status {
            status: status.as_u16(),
            path: resp.url().path().to_owned(),
        })
    }
}

/// Decode a JSON body, keeping the raw text on failure.
///
/// The server historically answers with `text/html` content types, so the
/// body is read as text and parsed regardless of the declared type.
async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let resp = check_status(resp)?;
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(body = %body, "response body");

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
