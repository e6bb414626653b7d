//! Pure request handlers
//!
//! Handlers take decoded input and return `Result<T, ApiError>`; they know
//! nothing about the HTTP server in front of them.

use chrono::{DateTime, Utc};

use super::error::ApiError;
use super::types::HealthData;
use crate::core::models::{AttestationRecord, CommitmentReceipt};
use crate::core::services::{CommitmentScheme, CommitmentService};

/// Message returned for undecodable prove bodies
pub const INVALID_JSON: &str = "invalid json";

/// Liveness probe; has no dependencies and cannot fail
#[must_use]
pub fn health() -> HealthData {
    HealthData::ok()
}

/// Decode an attestation and issue a receipt for it as of `now`
pub fn prove<C: CommitmentScheme>(
    service: &CommitmentService<C>,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<CommitmentReceipt, ApiError> {
    let record: AttestationRecord = serde_json::from_slice(body).map_err(|e| {
        log::debug!("rejecting prove body: {e}");
        ApiError::bad_request(INVALID_JSON)
    })?;
    let receipt = service.prove(&record, now);
    log::info!(
        "proved req_id={} service={} proof_id={}",
        record.req_id,
        receipt.service_name,
        receipt.proof_id
    );
    Ok(receipt)
}
