//! Commitment derivation
//!
//! Stand-in for a real proof backend: the commitment is a SHA-256 digest
//! over the attestation fields and a shared secret, and the proof id is a
//! digest over the commitment and the generation time. Both are exposed as
//! opaque hex strings so a proving system can replace [`Sha256Commitment`]
//! behind [`CommitmentScheme`] without touching the wire format.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::core::models::{AttestationRecord, CommitmentReceipt, STATUS_OK};

/// Separator between preimage parts
pub const DELIMITER: &str = "|";

/// Turns an attestation into an opaque commitment string
pub trait CommitmentScheme: Send + Sync {
    /// Derive the commitment; must be deterministic for identical records
    fn commit(&self, record: &AttestationRecord) -> String;
}

/// SHA-256 over the `|`-joined attestation fields followed by the secret
#[derive(Clone, Default)]
pub struct Sha256Commitment {
    secret: String,
}

impl Sha256Commitment {
    /// Create a scheme keyed with `secret` (may be empty)
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Sha256Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256Commitment")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl CommitmentScheme for Sha256Commitment {
    fn commit(&self, record: &AttestationRecord) -> String {
        sha256_hex(&commitment_preimage(record, &self.secret))
    }
}

/// Build the commitment preimage
///
/// Absent optional fields contribute an empty string, so absent and empty
/// are indistinguishable. `jar_sha256` is not part of the preimage.
#[must_use]
pub fn commitment_preimage(record: &AttestationRecord, secret: &str) -> String {
    fn opt(v: &Option<String>) -> &str {
        v.as_deref().unwrap_or("")
    }
    [
        opt(&record.service_name),
        opt(&record.service_namespace),
        opt(&record.pod_name),
        opt(&record.pod_uid),
        opt(&record.image_digest),
        opt(&record.code_version),
        opt(&record.code_hash),
        record.req_id.as_str(),
        record.input.as_str(),
        record.output.as_str(),
        secret,
    ]
    .join(DELIMITER)
}

/// Derive a proof id from the echoed service name, request id, commitment
/// and generation time in Unix nanoseconds
#[must_use]
pub fn derive_proof_id(service_name: &str, req_id: &str, commitment: &str, nanos: i64) -> String {
    sha256_hex(&format!("{service_name}|{req_id}|{commitment}|{nanos}"))
}

/// Lowercase hex SHA-256 of a string
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Issues receipts for attestations
///
/// Holds only read-only configuration; `prove` is safe to call from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct CommitmentService<C = Sha256Commitment> {
    scheme: C,
    service_name: Option<String>,
    pod_name: Option<String>,
}

impl<C: CommitmentScheme> CommitmentService<C> {
    /// Create a service with its own identity used as receipt fallback
    #[must_use]
    pub const fn new(scheme: C, service_name: Option<String>, pod_name: Option<String>) -> Self {
        Self {
            scheme,
            service_name,
            pod_name,
        }
    }

    /// The commitment scheme in use
    #[must_use]
    pub const fn scheme(&self) -> &C {
        &self.scheme
    }

    /// Produce a receipt for `record` as of `now`
    #[must_use]
    pub fn prove(&self, record: &AttestationRecord, now: DateTime<Utc>) -> CommitmentReceipt {
        let service_name = value_or(record.service_name.as_deref(), self.service_name.as_deref());
        let pod_name = value_or(record.pod_name.as_deref(), self.pod_name.as_deref());

        let commitment = self.scheme.commit(record);
        // Out of i64 range only past the year 2262
        let nanos = now.timestamp_nanos_opt().unwrap_or(i64::MAX);
        let proof_id = derive_proof_id(&service_name, &record.req_id, &commitment, nanos);

        CommitmentReceipt {
            status: STATUS_OK.to_string(),
            proof_id,
            commitment,
            generated_at: now.to_rfc3339_opts(SecondsFormat::Nanos, true),
            service_name,
            pod_name,
        }
    }
}

fn value_or(value: Option<&str>, fallback: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .or(fallback)
        .unwrap_or_default()
        .to_string()
}
