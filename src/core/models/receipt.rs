//! Commitment receipt model

use serde::{Deserialize, Serialize};

/// Status reported by a successful prove call
pub const STATUS_OK: &str = "ok";

/// Receipt returned by the commitment service for one attestation
///
/// The receipt is not signed. It binds the attestation only through
/// `commitment`, which a verifier can recompute if it holds the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentReceipt {
    /// `"ok"` on success
    pub status: String,
    /// Per-call identifier, unique even for identical attestations
    pub proof_id: String,
    /// Deterministic digest over the attestation and the shared secret
    pub commitment: String,
    /// Generation time, RFC 3339 UTC with nanoseconds
    pub generated_at: String,
    /// Service name echoed from the attestation (or the service's own)
    pub service_name: String,
    /// Pod name echoed from the attestation (or the service's own)
    pub pod_name: String,
}
