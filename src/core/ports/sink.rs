//! Attestation sink port
//!
//! Defines how an attestation reaches the commitment service.

use thiserror::Error;

use crate::core::models::AttestationRecord;

/// Why a delivery attempt failed
///
/// The emitter treats every variant the same way (spool the record); the
/// distinction only matters for logs.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Could not build or send the request (connection refused, DNS, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The call did not complete within the configured bound
    #[error("timed out after {0} ms")]
    Timeout(u128),

    /// The service answered with a non-2xx status
    #[error("sidecar status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },
}

/// Destination for attestations
///
/// One call is one attempt; implementations must not retry.
pub trait AttestationSink: Send + Sync {
    /// Deliver a record, succeeding only if the receiver acknowledged it
    fn deliver(&self, record: &AttestationRecord) -> Result<(), DeliveryError>;
}
