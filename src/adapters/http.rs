//! HTTP attestation sink
//!
//! Posts records as JSON to the commitment service with a single bounded
//! attempt. Success is judged on the status code alone; the receipt body is
//! not parsed.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::core::models::AttestationRecord;
use crate::core::ports::{AttestationSink, DeliveryError};

/// Longest response-body excerpt kept in a [`DeliveryError::Status`]
const BODY_EXCERPT_CHARS: usize = 256;

/// Blocking HTTP client for the commitment service's `/prove` endpoint
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpSink {
    /// Create a sink posting to `url`, bounding each call by `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    /// Endpoint this sink posts to
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AttestationSink for HttpSink {
    fn deliver(&self, record: &AttestationRecord) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout(self.timeout.as_millis())
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: String = response
            .text()
            .unwrap_or_default()
            .chars()
            .take(BODY_EXCERPT_CHARS)
            .collect();
        Err(DeliveryError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
