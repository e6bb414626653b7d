//! Spool command - inspect spooled attestations

use zk_poe::adapters::FileSpool;
use zk_poe::config::{ConfigFile, EmitterConfig};
use zk_poe::output::{OutputMode, SpoolEntry, SpoolListResult};

/// List spooled attestations
pub fn spool_list(file: &ConfigFile, mode: OutputMode) -> anyhow::Result<()> {
    let config = EmitterConfig::resolve(file, |k| std::env::var(k).ok())?;
    let spool = FileSpool::new(config.spool_dir);

    let entries = spool
        .list()?
        .into_iter()
        .map(|path| {
            let (req_id, error) = match FileSpool::read(&path) {
                Ok(record) => (Some(record.req_id), None),
                Err(e) => (None, Some(e.to_string())),
            };
            SpoolEntry {
                file: path.display().to_string(),
                req_id,
                error,
            }
        })
        .collect();

    SpoolListResult {
        dir: spool.dir().display().to_string(),
        entries,
    }
    .render(mode);
    Ok(())
}
