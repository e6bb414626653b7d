//! Attestation record model
//!
//! An attestation binds a request's identity and code provenance to the
//! input it received and the output it produced. Records are built once per
//! request and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Service name used when no `SERVICE_NAME` is configured
pub const DEFAULT_SERVICE_NAME: &str = "payment";

/// One proof-of-execution attestation, as sent over the wire and spooled to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationRecord {
    /// Logical service emitting the attestation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Kubernetes namespace (or equivalent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_namespace: Option<String>,
    /// Pod name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
    /// Pod UID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_uid: Option<String>,
    /// Container image digest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_digest: Option<String>,
    /// Code version (tag, semver, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_version: Option<String>,
    /// Source tree hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_hash: Option<String>,
    /// Reserved for artifact digests; never set by [`AttestationBuilder`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_sha256: Option<String>,
    /// Caller-supplied request identifier
    pub req_id: String,
    /// JSON encoding of the call input
    pub input: String,
    /// JSON encoding of the call result
    pub output: String,
}

impl AttestationRecord {
    /// Create a record with no identity or provenance fields
    #[must_use]
    pub fn bare(
        req_id: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            service_name: None,
            service_namespace: None,
            pod_name: None,
            pod_uid: None,
            image_digest: None,
            code_version: None,
            code_hash: None,
            jar_sha256: None,
            req_id: req_id.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Identity and provenance stamped onto every record
///
/// `None` means unknown. Empty strings are normalised to `None` by
/// [`Provenance::field`] so that configuration never yields `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Service name (always known, defaults to [`DEFAULT_SERVICE_NAME`])
    pub service_name: String,
    /// Namespace
    pub service_namespace: Option<String>,
    /// Pod name
    pub pod_name: Option<String>,
    /// Pod UID
    pub pod_uid: Option<String>,
    /// Image digest
    pub image_digest: Option<String>,
    /// Code version
    pub code_version: Option<String>,
    /// Code hash
    pub code_hash: Option<String>,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_namespace: None,
            pod_name: None,
            pod_uid: None,
            image_digest: None,
            code_version: None,
            code_hash: None,
        }
    }
}

impl Provenance {
    /// Normalise an optional configuration value: empty means absent
    #[must_use]
    pub fn field(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }
}

/// Builds [`AttestationRecord`]s from a fixed [`Provenance`]
#[derive(Debug, Clone)]
pub struct AttestationBuilder {
    provenance: Provenance,
}

impl AttestationBuilder {
    /// Create a builder stamping records with `provenance`
    #[must_use]
    pub const fn new(provenance: Provenance) -> Self {
        Self { provenance }
    }

    /// The provenance this builder stamps onto records
    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Build a record for one request
    ///
    /// Input and output are JSON-encoded. A value that fails to encode
    /// becomes an empty string; building never fails.
    pub fn build<I, O>(&self, req_id: &str, input: &I, output: &O) -> AttestationRecord
    where
        I: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        let p = &self.provenance;
        AttestationRecord {
            service_name: Some(p.service_name.clone()),
            service_namespace: p.service_namespace.clone(),
            pod_name: p.pod_name.clone(),
            pod_uid: p.pod_uid.clone(),
            image_digest: p.image_digest.clone(),
            code_version: p.code_version.clone(),
            code_hash: p.code_hash.clone(),
            jar_sha256: None,
            req_id: req_id.to_string(),
            input: encode(req_id, "input", input),
            output: encode(req_id, "output", output),
        }
    }
}

fn encode<T: Serialize + ?Sized>(req_id: &str, field: &str, value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("poe {req_id}: could not encode {field}, attesting empty string: {e}");
        String::new()
    })
}
