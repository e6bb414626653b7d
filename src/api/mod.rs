//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure handlers
//! for the commitment service that can sit behind any HTTP server
//! implementation (`tiny_http` today) or be called directly.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod metrics;
mod types;

pub use error::{ApiError, ErrorBody, ErrorCode};
pub use handlers::{INVALID_JSON, health, prove};
pub use metrics::{MetricsData, ServiceMetrics};
pub use types::HealthData;
