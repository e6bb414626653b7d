//! File-based spool for undelivered attestations
//!
//! ## Layout
//!
//! ```text
//! $ZK_SPOOL_DIR/                       # default /tmp/zk-spool, mode 0700
//! ├── poe_r1_1714564800000.json        # one complete record per file, mode 0600
//! ├── poe_r2_1714564800007.json
//! └── poe_a_b-9f86d081_1714564800009.json   # sanitized id + digest suffix
//! ```
//!
//! Files are written to a temporary name in the same directory, synced, and
//! then linked under their final name without clobbering, so a reader never
//! observes a partial `poe_*.json` file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::core::models::AttestationRecord;
use crate::core::ports::{SpoolError, SpoolStore};
use crate::core::services::sha256_hex;

/// Prefix of every spool file name
pub const FILE_PREFIX: &str = "poe_";

/// Extension of every spool file name
pub const FILE_EXTENSION: &str = ".json";

/// Longest sanitized request id kept in a file name
const MAX_ID_CHARS: usize = 64;

/// Hex digits of the raw-id digest appended to altered ids
const ID_DIGEST_CHARS: usize = 8;

/// Candidate names tried per record before giving up
const MAX_NAME_ATTEMPTS: u32 = 16;

/// Spool directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSpool {
    dir: PathBuf,
}

impl FileSpool {
    /// Create a spool rooted at `dir` (created lazily on first write)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Spool directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List spooled files, oldest name first
    ///
    /// A missing directory is an empty spool. Temporary files of in-flight
    /// writes are skipped.
    pub fn list(&self) -> Result<Vec<PathBuf>, SpoolError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SpoolError::Read {
                    path: self.dir.clone(),
                    source,
                });
            },
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SpoolError::Read {
                path: self.dir.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(FILE_PREFIX) && name.ends_with(FILE_EXTENSION) {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Decode one spooled file
    pub fn read(path: &Path) -> Result<AttestationRecord, SpoolError> {
        let content = fs::read_to_string(path).map_err(|source| SpoolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SpoolError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    fn ensure_dir(&self) -> Result<(), SpoolError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&self.dir).map_err(|source| SpoolError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    fn staged(&self, bytes: &[u8]) -> Result<NamedTempFile, SpoolError> {
        let write_err = |source| SpoolError::Write {
            path: self.dir.clone(),
            source,
        };
        // NamedTempFile is created 0600 on Unix
        let mut tmp = Builder::new()
            .prefix(".poe-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(write_err)?;
        tmp.write_all(bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        Ok(tmp)
    }
}

impl SpoolStore for FileSpool {
    fn write(&self, record: &AttestationRecord) -> Result<PathBuf, SpoolError> {
        self.ensure_dir()?;
        let bytes = serde_json::to_vec(record)?;
        let mut tmp = self.staged(&bytes)?;

        let stem = format!(
            "{FILE_PREFIX}{}_{}",
            sanitize_req_id(&record.req_id),
            chrono::Utc::now().timestamp_millis()
        );
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{stem}{FILE_EXTENSION}")
            } else {
                format!("{stem}_{attempt}{FILE_EXTENSION}")
            };
            let path = self.dir.join(name);
            match tmp.persist_noclobber(&path) {
                Ok(_) => return Ok(path),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => tmp = e.file,
                Err(e) => {
                    return Err(SpoolError::Write {
                        path,
                        source: e.error,
                    });
                },
            }
        }
        Err(SpoolError::NameExhausted(self.dir.join(stem)))
    }
}

/// Make a request id safe to embed in a file name
///
/// Keeps `[A-Za-z0-9._-]`, replaces anything else with `_` and caps the
/// length. When the id had to be altered (or was empty) a short digest of
/// the raw id is appended, so two different raw ids never share a name.
#[must_use]
pub fn sanitize_req_id(raw: &str) -> String {
    let mut altered = raw.is_empty();
    let mut safe: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                altered = true;
                '_'
            }
        })
        .collect();

    if safe.len() > MAX_ID_CHARS {
        safe.truncate(MAX_ID_CHARS);
        altered = true;
    }
    if altered {
        let digest = sha256_hex(raw);
        safe.push('-');
        safe.push_str(&digest[..ID_DIGEST_CHARS]);
    }
    safe
}
