//! Request outcome counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct Metrics {
    pub requests: AtomicU64,
    pub saves_stored: AtomicU64,
    pub saves_rejected: AtomicU64,
    pub malformed_bodies: AtomicU64,
    pub store_unavailable: AtomicU64,
    pub store_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the running total, including this request.
    pub fn record_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_stored(&self) {
        self.saves_stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.saves_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed_bodies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unavailable(&self) {
        self.store_unavailable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            saves_stored: self.saves_stored.load(Ordering::Relaxed),
            saves_rejected: self.saves_rejected.load(Ordering::Relaxed),
            malformed_bodies: self.malformed_bodies.load(Ordering::Relaxed),
            store_unavailable: self.store_unavailable.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub saves_stored: u64,
    pub saves_rejected: u64,
    pub malformed_bodies: u64,
    pub store_unavailable: u64,
    pub store_failures: u64,
}
