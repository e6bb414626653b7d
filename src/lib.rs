//! zk-poe - Proof-of-execution attestations for payment services
//!
//! This library provides both halves of the attestation pipeline: the
//! emitter that builds, delivers and (on failure) spools attestation
//! records, and the commitment service that turns records into receipts.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod server;

pub use adapters::{PoeEmitter, emitter_from_config};
pub use crate::core::models::{AttestationRecord, CommitmentReceipt, EmitOutcome};
