//! Business logic services
//!
//! - [`commitment`] - Derive commitments, proof ids and receipts
//! - [`emitter`] - Build, deliver and spool attestations

pub mod commitment;
pub mod emitter;

pub use commitment::{
    CommitmentScheme, CommitmentService, Sha256Commitment, commitment_preimage, derive_proof_id,
    sha256_hex,
};
pub use emitter::Emitter;
