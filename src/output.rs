//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::core::models::{CommitmentReceipt, EmitOutcome};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of an emit operation
#[derive(Debug, Serialize)]
pub struct EmitResult {
    /// Request id that was attested
    pub req_id: String,
    /// `delivered`, `spooled` or `lost`
    pub outcome: String,
    /// Spool file, when spooled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spool_file: Option<String>,
    /// Failure reason, when lost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EmitResult {
    /// Summarise an outcome for `req_id`
    #[must_use]
    pub fn new(req_id: &str, outcome: &EmitOutcome) -> Self {
        let (spool_file, reason) = match outcome {
            EmitOutcome::Delivered => (None, None),
            EmitOutcome::Spooled(path) => (Some(path.display().to_string()), None),
            EmitOutcome::Lost(reason) => (None, Some(reason.clone())),
        };
        Self {
            req_id: req_id.to_string(),
            outcome: outcome.label().to_string(),
            spool_file,
            reason,
        }
    }
}

/// Result of a spool list operation
#[derive(Debug, Serialize)]
pub struct SpoolListResult {
    /// Spool directory
    pub dir: String,
    /// Spooled attestations, oldest name first
    pub entries: Vec<SpoolEntry>,
}

/// One spooled attestation
#[derive(Debug, Serialize)]
pub struct SpoolEntry {
    /// File path
    pub file: String,
    /// Request id read from the file, if it decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_id: Option<String>,
    /// Decode error, if it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a local commit operation
#[derive(Debug, Serialize)]
pub struct CommitResult {
    /// File the attestation was read from
    pub file: String,
    /// Receipt computed locally
    pub receipt: CommitmentReceipt,
}

impl EmitResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        match (&self.spool_file, &self.reason) {
            (Some(file), _) => println!("{}: spooled to {file}", self.req_id),
            (None, Some(reason)) => println!("{}: lost ({reason})", self.req_id),
            (None, None) => println!("{}: {}", self.req_id, self.outcome),
        }
    }
}

impl SpoolListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        if self.entries.is_empty() {
            println!("Spool {} is empty.", self.dir);
            return;
        }

        println!("{} spooled attestation(s) in {}:\n", self.entries.len(), self.dir);
        for e in &self.entries {
            match (&e.req_id, &e.error) {
                (Some(req_id), _) => println!("  {req_id}  {}", e.file),
                (None, Some(err)) => println!("  INVALID  {}  ({err})", e.file),
                (None, None) => println!("  ?  {}", e.file),
            }
        }
    }
}

impl CommitResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("File:       {}", self.file);
                println!("Commitment: {}", self.receipt.commitment);
                println!("Proof id:   {}", self.receipt.proof_id);
                println!("Generated:  {}", self.receipt.generated_at);
            },
            OutputMode::Json => render_json(self),
        }
    }
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}
