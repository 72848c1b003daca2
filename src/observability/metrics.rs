//! Counters-only metrics.
//!
//! Monotonic, exact, reset only on process start. Relaxed atomics: the
//! counters tolerate eventual consistency and must never slow down the
//! scan path.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the engine.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    scans_started: AtomicU64,
    scans_completed: AtomicU64,
    scans_cancelled: AtomicU64,
    violations_detected: AtomicU64,
    repairs_attempted: AtomicU64,
    repairs_succeeded: AtomicU64,
    repairs_failed: AtomicU64,
    writes_checked: AtomicU64,
    writes_rejected: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_scans_started(&self) {
        self.scans_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_scans_completed(&self) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_scans_cancelled(&self) {
        self.scans_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_violations_detected(&self, count: u64) {
        self.violations_detected.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_repairs_attempted(&self, count: u64) {
        self.repairs_attempted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_repairs_succeeded(&self, count: u64) {
        self.repairs_succeeded.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_repairs_failed(&self, count: u64) {
        self.repairs_failed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_writes_checked(&self) {
        self.writes_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_rejected(&self) {
        self.writes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scans_started: self.scans_started.load(Ordering::Relaxed),
            scans_completed: self.scans_completed.load(Ordering::Relaxed),
            scans_cancelled: self.scans_cancelled.load(Ordering::Relaxed),
            violations_detected: self.violations_detected.load(Ordering::Relaxed),
            repairs_attempted: self.repairs_attempted.load(Ordering::Relaxed),
            repairs_succeeded: self.repairs_succeeded.load(Ordering::Relaxed),
            repairs_failed: self.repairs_failed.load(Ordering::Relaxed),
            writes_checked: self.writes_checked.load(Ordering::Relaxed),
            writes_rejected: self.writes_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Serializable counter snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub scans_started: u64,
    pub scans_completed: u64,
    pub scans_cancelled: u64,
    pub violations_detected: u64,
    pub repairs_attempted: u64,
    pub repairs_succeeded: u64,
    pub repairs_failed: u64,
    pub writes_checked: u64,
    pub writes_rejected: u64,
}
