//! HTTP seam between the API client and the network.
//!
//! [`HttpTransport`] is the production implementation on top of the blocking
//! reqwest client. Anything implementing [`Transport`] can stand in for it,
//! which is how the orchestrator is exercised against canned endpoints.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;

/// Status and body of a completed request. Non-2xx statuses are not errors
/// at this layer; the caller decides what a status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues unauthenticated GET requests.
///
/// Implementations are shared across the fetch threads, hence `Send + Sync`.
/// An `Err` means the request never produced a response (connection refused,
/// DNS failure, timeout, unreadable body).
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// [`Transport`] backed by [`reqwest::blocking::Client`].
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the underlying client. `timeout = None` disables reqwest's
    /// default 30 second limit so requests wait as long as the server does.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        let resp = self.client.get(url).query(query).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(RawResponse { status, body })
    }
}
