//! Observability subsystem
//!
//! Per OBSERVABILITY.md:
//! - Structured logging (one JSON line per event, deterministic key order)
//! - Counters-only metrics
//! - Scope-based lifecycle tracing for scans and repairs
//!
//! Observability is read-only: no side effects on validation or repair,
//! no async, no background threads.

mod logger;
mod metrics;
mod scope;

pub use logger::{LogLevel, Logger};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};
