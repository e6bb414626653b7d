//! API request and response types
//!
//! The prove request and response are the domain's own
//! [`AttestationRecord`](crate::core::models::AttestationRecord) and
//! [`CommitmentReceipt`](crate::core::models::CommitmentReceipt); only the
//! health payload is specific to the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::core::models::STATUS_OK;

/// Health endpoint response data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    /// Always `"ok"` while the process is serving
    pub status: String,
}

impl HealthData {
    /// The one health payload
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
        }
    }
}
