//! Core domain logic for zk-poe
//!
//! This module contains the attestation logic with no network or
//! filesystem dependencies. All external interactions are abstracted
//! through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (AttestationRecord, CommitmentReceipt, EmitOutcome)
//! - `services/` - Commitment derivation and emission orchestration
//! - `ports/` - Trait definitions for the sink and the spool

pub mod models;
pub mod ports;
pub mod services;
