//! HTTP range lookup.
//!
//! [`RangeClient`] calls the range service with `?patientId=<id>` and maps
//! the response onto the [`RangeLookup`] contract: 200 is a range, 404 is an
//! unknown subject, anything else (including a timeout) is a transport
//! failure. There is no retry.

use std::time::Duration;

use async_trait::async_trait;
use pulse_core::error::CoreError;
use pulse_core::store::RangeLookup;
use pulse_core::types::{Range, SubjectId};
use reqwest::StatusCode;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a failed range lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The range service answered with an unexpected status.
    #[error("Range service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl From<LookupError> for CoreError {
    fn from(err: LookupError) -> Self {
        CoreError::Transport(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// RangeClient
// ---------------------------------------------------------------------------

/// Success body of the range service.
#[derive(Debug, Deserialize)]
struct RangeBody {
    min: i32,
    max: i32,
}

/// Range lookup over HTTP.
#[derive(Debug)]
pub struct RangeClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl RangeClient {
    /// Build a client for the full range endpoint URL (for example
    /// `http://localhost:3000/api/v1/range`). Every request is bounded by
    /// `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CoreError> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|e| {
            CoreError::Configuration(format!("invalid range service URL '{endpoint}': {e}"))
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Configuration(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { client, endpoint })
    }

    async fn fetch(&self, subject_id: SubjectId) -> Result<Option<RangeBody>, LookupError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("patientId", subject_id)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<RangeBody>().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(LookupError::HttpStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl RangeLookup for RangeClient {
    async fn get_range(&self, subject_id: SubjectId) -> Result<Range, CoreError> {
        match self.fetch(subject_id).await? {
            Some(body) => Ok(Range {
                subject_id,
                min: body.min,
                max: body.max,
            }),
            None => Err(CoreError::UnknownSubject(subject_id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
