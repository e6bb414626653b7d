//! Domain models for zk-poe
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`AttestationRecord`] - "this request got this input and produced this output"
//! - [`Provenance`] - who produced it (service, pod, image, code)
//! - [`CommitmentReceipt`] - what the commitment service returns
//! - [`EmitOutcome`] - delivered, spooled or lost

mod attestation;
mod outcome;
mod receipt;

pub use attestation::{AttestationBuilder, AttestationRecord, DEFAULT_SERVICE_NAME, Provenance};
pub use outcome::EmitOutcome;
pub use receipt::{CommitmentReceipt, STATUS_OK};
