//! Spool store port
//!
//! Durable local fallback for attestations that could not be delivered.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::models::AttestationRecord;

/// Errors raised while spooling or reading back spooled attestations
#[derive(Debug, Error)]
pub enum SpoolError {
    /// Spool directory could not be created
    #[error("cannot create spool directory {path}: {source}")]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Record could not be encoded
    #[error("cannot encode attestation: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing or persisting the file failed
    #[error("cannot write spool file {path}: {source}")]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Every candidate file name for this record was already taken
    #[error("no free spool file name for {0}")]
    NameExhausted(PathBuf),

    /// Reading a spooled file failed
    #[error("cannot read spool file {path}: {source}")]
    Read {
        /// Source path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A spooled file does not hold a valid attestation
    #[error("invalid spool file {path}: {source}")]
    Decode {
        /// Source path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Write-once storage for undelivered attestations
pub trait SpoolStore: Send + Sync {
    /// Persist a record as a new, complete file and return its path
    fn write(&self, record: &AttestationRecord) -> Result<PathBuf, SpoolError>;
}
