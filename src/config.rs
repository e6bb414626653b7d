//! Configuration
//!
//! Both halves of the pipeline take an explicit, immutable configuration
//! built once at process start. Values are resolved from, in increasing
//! precedence:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`[emitter]` and `[service]` tables)
//! 3. environment variables
//!
//! Empty environment values count as unset.
//!
//! ```toml
//! [emitter]
//! sidecar_url = "http://127.0.0.1:8089/prove"
//! spool_dir = "/var/spool/zk-poe"
//! timeout_ms = 2000
//! service_name = "payment"
//!
//! [service]
//! listen_addr = "127.0.0.1:8089"
//! workers = 4
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{DEFAULT_SERVICE_NAME, Provenance};

/// Default commitment service endpoint used by the emitter
pub const DEFAULT_SIDECAR_URL: &str = "http://127.0.0.1:8089/prove";

/// Default spool directory
pub const DEFAULT_SPOOL_DIR: &str = "/tmp/zk-spool";

/// Default bind address of the commitment service (loopback only)
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8089";

/// Default bound on one delivery attempt
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default number of request worker threads in the commitment service
pub const DEFAULT_WORKERS: usize = 4;

/// Default maximum accepted request body
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Recognized environment variables
pub mod env {
    /// Commitment service endpoint for the emitter
    pub const SIDECAR_INGEST_URL: &str = "SIDECAR_INGEST_URL";
    /// Spool directory
    pub const ZK_SPOOL_DIR: &str = "ZK_SPOOL_DIR";
    /// Service identity
    pub const SERVICE_NAME: &str = "SERVICE_NAME";
    /// Namespace
    pub const SERVICE_NAMESPACE: &str = "SERVICE_NAMESPACE";
    /// Pod name
    pub const POD_NAME: &str = "POD_NAME";
    /// Pod UID
    pub const POD_UID: &str = "POD_UID";
    /// Image digest
    pub const IMAGE_DIGEST: &str = "IMAGE_DIGEST";
    /// Code version
    pub const CODE_VERSION: &str = "CODE_VERSION";
    /// Code hash
    pub const CODE_HASH: &str = "CODE_HASH";
    /// Commitment service bind address
    pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
    /// Shared commitment secret
    pub const POE_SECRET: &str = "POE_SECRET";
    /// Delivery timeout in milliseconds
    pub const POE_TIMEOUT_MS: &str = "POE_TIMEOUT_MS";
    /// Commitment service worker threads
    pub const POE_WORKERS: &str = "POE_WORKERS";
    /// Maximum request body size in bytes
    pub const POE_MAX_BODY_BYTES: &str = "POE_MAX_BODY_BYTES";
}

/// Errors raised while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// A value could not be interpreted
    #[error("invalid value for {key}: {value:?}")]
    Invalid {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
    },
}

// =============================================================================
// FILE LAYER
// =============================================================================

/// Contents of an optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Emitter settings
    #[serde(default)]
    pub emitter: EmitterSection,
    /// Commitment service settings
    #[serde(default)]
    pub service: ServiceSection,
}

/// `[emitter]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitterSection {
    /// Commitment service endpoint
    pub sidecar_url: Option<String>,
    /// Spool directory
    pub spool_dir: Option<PathBuf>,
    /// Delivery timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Service name
    pub service_name: Option<String>,
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

/// `[service]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Bind address
    pub listen_addr: Option<String>,
    /// Shared commitment secret
    pub secret: Option<String>,
    /// Own service name, used when an attestation carries none
    pub service_name: Option<String>,
    /// Own pod name, used when an attestation carries none
    pub pod_name: Option<String>,
    /// Worker threads
    pub workers: Option<usize>,
    /// Maximum request body size in bytes
    pub max_body_bytes: Option<usize>,
}

impl ConfigFile {
    /// Parse TOML text
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load and parse a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load `path` if given, otherwise an empty file layer
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

// =============================================================================
// RESOLVED CONFIGURATION
// =============================================================================

/// Resolved emitter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Commitment service endpoint
    pub sidecar_url: String,
    /// Spool directory
    pub spool_dir: PathBuf,
    /// Bound on one delivery attempt
    pub timeout: Duration,
    /// Identity stamped on every record
    pub provenance: Provenance,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            sidecar_url: DEFAULT_SIDECAR_URL.to_string(),
            spool_dir: PathBuf::from(DEFAULT_SPOOL_DIR),
            timeout: DEFAULT_TIMEOUT,
            provenance: Provenance::default(),
        }
    }
}

impl EmitterConfig {
    /// Resolve from the process environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(&ConfigFile::default(), process_env)
    }

    /// Resolve from a file layer and an environment lookup
    pub fn resolve<F>(file: &ConfigFile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let f = &file.emitter;
        let pick = |key: &str, from_file: &Option<String>| {
            get(key).or_else(|| Provenance::field(from_file.clone()))
        };

        let timeout = match get(env::POE_TIMEOUT_MS) {
            Some(raw) => Duration::from_millis(parse_value(env::POE_TIMEOUT_MS, &raw)?),
            None => f.timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis),
        };

        Ok(Self {
            sidecar_url: pick(env::SIDECAR_INGEST_URL, &f.sidecar_url)
                .unwrap_or_else(|| DEFAULT_SIDECAR_URL.to_string()),
            spool_dir: get(env::ZK_SPOOL_DIR)
                .map(PathBuf::from)
                .or_else(|| f.spool_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SPOOL_DIR)),
            timeout,
            provenance: Provenance {
                service_name: pick(env::SERVICE_NAME, &f.service_name)
                    .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
                service_namespace: pick(env::SERVICE_NAMESPACE, &f.service_namespace),
                pod_name: pick(env::POD_NAME, &f.pod_name),
                pod_uid: pick(env::POD_UID, &f.pod_uid),
                image_digest: pick(env::IMAGE_DIGEST, &f.image_digest),
                code_version: pick(env::CODE_VERSION, &f.code_version),
                code_hash: pick(env::CODE_HASH, &f.code_hash),
            },
        })
    }
}

/// Resolved commitment service configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Bind address
    pub listen_addr: String,
    /// Shared commitment secret (may be empty)
    pub secret: String,
    /// Own service name, receipt fallback
    pub service_name: Option<String>,
    /// Own pod name, receipt fallback
    pub pod_name: Option<String>,
    /// Worker threads
    pub workers: usize,
    /// Maximum request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            secret: String::new(),
            service_name: None,
            pod_name: None,
            workers: DEFAULT_WORKERS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("listen_addr", &self.listen_addr)
            .field("secret", &if self.secret.is_empty() { "<empty>" } else { "<redacted>" })
            .field("service_name", &self.service_name)
            .field("pod_name", &self.pod_name)
            .field("workers", &self.workers)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl ServiceConfig {
    /// Resolve from the process environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(&ConfigFile::default(), process_env)
    }

    /// Resolve from a file layer and an environment lookup
    pub fn resolve<F>(file: &ConfigFile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let s = &file.service;

        let workers = match get(env::POE_WORKERS) {
            Some(raw) => parse_value(env::POE_WORKERS, &raw)?,
            None => s.workers.unwrap_or(DEFAULT_WORKERS),
        };
        if workers == 0 {
            return Err(ConfigError::Invalid {
                key: "workers".to_string(),
                value: "0".to_string(),
            });
        }
        let max_body_bytes = match get(env::POE_MAX_BODY_BYTES) {
            Some(raw) => parse_value(env::POE_MAX_BODY_BYTES, &raw)?,
            None => s.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES),
        };

        Ok(Self {
            listen_addr: get(env::LISTEN_ADDR)
                .or_else(|| s.listen_addr.clone())
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            secret: get(env::POE_SECRET)
                .or_else(|| s.secret.clone())
                .unwrap_or_default(),
            service_name: get(env::SERVICE_NAME).or_else(|| Provenance::field(s.service_name.clone())),
            pod_name: get(env::POD_NAME).or_else(|| Provenance::field(s.pod_name.clone())),
            workers,
            max_body_bytes,
        })
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
