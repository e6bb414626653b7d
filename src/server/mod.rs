//! HTTP server adapters
//!
//! This module provides adapters that translate between HTTP frameworks
//! and the HTTP-agnostic API layer.
//!
//! Currently supported:
//! - `tiny_http` - Thread-pooled server for the commitment service

pub mod tiny_http;

pub use self::tiny_http::{CommitmentServer, RunningServer};
