//! Emit command - attest a single request from the command line
//!
//! Useful for smoke-testing a sidecar or a spool directory without running
//! the payment service.

use serde_json::Value;

use zk_poe::config::{ConfigFile, EmitterConfig};
use zk_poe::emitter_from_config;
use zk_poe::output::{EmitResult, OutputMode};

/// Emit one attestation and report what happened to it
pub fn emit(
    file: &ConfigFile,
    req_id: &str,
    input: &str,
    output: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = EmitterConfig::resolve(file, |k| std::env::var(k).ok())?;
    let emitter = emitter_from_config(&config)?;

    let outcome = emitter.emit(req_id, &as_json(input), &as_json(output));
    EmitResult::new(req_id, &outcome).render(mode);
    Ok(())
}

/// Interpret an argument as JSON, falling back to a JSON string
fn as_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
