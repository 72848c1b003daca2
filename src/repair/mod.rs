//! Repair engine
//!
//! Consumes a violation set and deletes the auto-fixable records.
//! Policy is severity-driven: only `warning` violations are touched;
//! `error` violations (cross-tenant breaks, dangling relationship
//! endpoints) always require manual review and are tallied as failed
//! without any write.
//!
//! Repair is idempotent. The scan and repair steps are not
//! transactionally linked, so a record may already be gone by the time
//! repair reaches it; deleting an absent record counts as repaired.

use serde::{Deserialize, Serialize};

use crate::observability::Logger;
use crate::scanner::{Severity, Violation};
use crate::store::DataAccess;

/// Tally of one repair run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepairReport {
    pub repaired: usize,
    pub failed: usize,
}

/// Deletes warning-severity records through the data access layer.
pub struct RepairEngine<'a, S: DataAccess> {
    store: &'a S,
}

impl<'a, S: DataAccess> RepairEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Process a violation set sequentially.
    ///
    /// Per-record isolation: one delete failure never aborts the batch
    /// or corrupts the tally. No retries; a failed repair stays in the
    /// `failed` count for a human or the next scan to reconsider.
    pub fn repair(&self, violations: &[Violation]) -> RepairReport {
        let mut report = RepairReport::default();

        for violation in violations {
            if violation.severity != Severity::Warning {
                report.failed += 1;
                Logger::warn(
                    "repair",
                    "REPAIR_SKIPPED",
                    &[
                        ("kind", violation.kind.as_str()),
                        ("record_id", &violation.record_id.to_string()),
                        ("reason", "severity requires manual review"),
                    ],
                );
                continue;
            }

            match self.store.delete_record(violation.record_id) {
                Ok(()) => report.repaired += 1,
                Err(err) if err.is_not_found() => {
                    // Removed between scan and repair.
                    report.repaired += 1;
                }
                Err(err) => {
                    report.failed += 1;
                    Logger::error(
                        "repair",
                        "REPAIR_FAILED",
                        &[
                            ("kind", violation.kind.as_str()),
                            ("record_id", &violation.record_id.to_string()),
                            ("reason", &err.to_string()),
                        ],
                    );
                }
            }
        }

        report
    }
}
