// Score sources: where the raw leaderboard rows come from.
//
// `ScoreSource` is the seam between the loader and the network so the
// loader can be exercised without one. `HttpScoreSource` performs the single
// GET against the spreadsheet endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use towerboard_core::config::Config;
use towerboard_core::record::PayloadError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Apps Script endpoints answer with a redirect to the rendered content.
const MAX_REDIRECTS: usize = 10;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between issuing the request and holding a
/// list of records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint answered with HTTP {0}")]
    Status(StatusCode),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected payload: {0}")]
    UnexpectedPayload(#[from] PayloadError),
}

// ---------------------------------------------------------------------------
// ScoreSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// Fetch the raw JSON payload (expected: an array of 4-element rows).
    async fn fetch_rows(&self) -> Result<Value, LoadError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// HttpScoreSource
// ---------------------------------------------------------------------------

pub struct HttpScoreSource {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpScoreSource {
    /// Build a source for `endpoint`. `timeout` of `None` waits forever.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder().redirect(Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        Self::new(
            config.source.endpoint.trim(),
            config.source.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoreSource for HttpScoreSource {
    async fn fetch_rows(&self) -> Result<Value, LoadError> {
        debug!(endpoint = %self.endpoint, "requesting leaderboard rows");

        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        debug!(%status, final_url = %response.url(), "leaderboard response received");

        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        format!("GET {}", self.endpoint)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
