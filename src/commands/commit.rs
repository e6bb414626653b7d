//! Commit command - compute a receipt for an attestation file locally
//!
//! Reads a JSON attestation (for example a spooled one) and derives the
//! commitment with the configured secret, exactly as the service would.

use std::path::Path;

use chrono::Utc;

use zk_poe::adapters::FileSpool;
use zk_poe::config::{ConfigFile, ServiceConfig};
use zk_poe::core::services::{CommitmentService, Sha256Commitment};
use zk_poe::output::{CommitResult, OutputMode};

/// Compute the receipt for one attestation file
pub fn commit(file: &ConfigFile, path: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let config = ServiceConfig::resolve(file, |k| std::env::var(k).ok())?;
    let record = FileSpool::read(path)?;

    let service = CommitmentService::new(
        Sha256Commitment::new(config.secret),
        config.service_name,
        config.pod_name,
    );
    CommitResult {
        file: path.display().to_string(),
        receipt: service.prove(&record, Utc::now()),
    }
    .render(mode);
    Ok(())
}
