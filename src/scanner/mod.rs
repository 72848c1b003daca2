//! Integrity scanner
//!
//! Walks the graph store through `DataAccess` and classifies
//! referential-integrity and tenant-isolation violations. Scanning is
//! read-only: violations are data for downstream decision-making, not
//! errors. Repair policy keys off each violation's severity: `warning`
//! is safe to auto-delete, `error` requires manual review.

mod scan;
mod violation;

pub use scan::{CancelToken, IntegrityScanner, ScanError, ScanOptions};
pub use violation::{DetectionResult, ScanSummary, Severity, Violation, ViolationKind};
