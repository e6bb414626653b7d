//! Request counters for the commitment service

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ErrorCode};

/// Counters of `/prove` requests by result
///
/// Lock-free; shared by every worker thread.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    proved: AtomicU64,
    bad_request: AtomicU64,
    method_not_allowed: AtomicU64,
    too_large: AtomicU64,
}

/// Point-in-time view of [`ServiceMetrics`], served by `GET /metrics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsData {
    /// Every `/prove` request counted below
    pub total: u64,
    /// Receipts issued
    pub proved: u64,
    /// Bodies rejected as invalid JSON
    pub bad_request: u64,
    /// Non-POST requests to `/prove`
    pub method_not_allowed: u64,
    /// Bodies over the size limit
    pub too_large: u64,
}

impl ServiceMetrics {
    /// Count a receipt
    pub fn record_proved(&self) {
        self.proved.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a rejected `/prove` request
    pub fn record_rejected(&self, error: &ApiError) {
        let counter = match error.code {
            ErrorCode::BadRequest => &self.bad_request,
            ErrorCode::MethodNotAllowed => &self.method_not_allowed,
            ErrorCode::PayloadTooLarge => &self.too_large,
            ErrorCode::NotFound | ErrorCode::Internal => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters
    #[must_use]
    pub fn snapshot(&self) -> MetricsData {
        let proved = self.proved.load(Ordering::Relaxed);
        let bad_request = self.bad_request.load(Ordering::Relaxed);
        let method_not_allowed = self.method_not_allowed.load(Ordering::Relaxed);
        let too_large = self.too_large.load(Ordering::Relaxed);
        MetricsData {
            total: proved + bad_request + method_not_allowed + too_large,
            proved,
            bad_request,
            method_not_allowed,
            too_large,
        }
    }
}
