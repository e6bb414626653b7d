//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `http` - Blocking HTTP sink posting to the commitment service
//! - `spool` - JSON files in the spool directory

pub mod http;
pub mod spool;

pub use http::HttpSink;
pub use spool::{FileSpool, sanitize_req_id};

use crate::config::EmitterConfig;
use crate::core::models::AttestationBuilder;
use crate::core::ports::DeliveryError;
use crate::core::services::Emitter;

/// Emitter wired to the real network and filesystem
pub type PoeEmitter = Emitter<HttpSink, FileSpool>;

/// Build the production emitter from resolved configuration
pub fn emitter_from_config(config: &EmitterConfig) -> Result<PoeEmitter, DeliveryError> {
    Ok(Emitter::new(
        AttestationBuilder::new(config.provenance.clone()),
        HttpSink::new(config.sidecar_url.clone(), config.timeout)?,
        FileSpool::new(config.spool_dir.clone()),
    ))
}
