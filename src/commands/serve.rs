//! Serve command - run the commitment service

use zk_poe::config::{ConfigFile, ServiceConfig};
use zk_poe::server::CommitmentServer;

/// Run the commitment service in the foreground
pub fn serve(file: &ConfigFile) -> anyhow::Result<()> {
    let config = ServiceConfig::resolve(file, |k| std::env::var(k).ok())?;
    log::debug!("service config: {config:?}");
    if config.secret.is_empty() {
        log::warn!("POE_SECRET is empty; commitments are not keyed");
    }
    CommitmentServer::bind(&config)?.run()
}
