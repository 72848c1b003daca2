//! Operational surface.
//!
//! The entry points an operator or scheduled job calls (trigger a
//! detection run, feed a violation subset back for repair) plus the
//! synchronous checks the write path invokes before persisting a
//! record. Scan and repair results are JSON-serializable; any dashboard
//! or CLI lives outside this crate and renders what these return.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Entity, Event, Relationship};
use crate::observability::{Logger, MetricsRegistry, ObservationScope, Timer};
use crate::registry::SchemaRegistry;
use crate::repair::{RepairEngine, RepairReport};
use crate::scanner::{DetectionResult, IntegrityScanner, ScanError, ScanOptions, Violation};
use crate::store::DataAccess;
use crate::writecheck;

/// Run a full detection pass, unfiltered or for one tenant.
pub fn trigger_scan<S: DataAccess>(
    store: &S,
    metrics: &MetricsRegistry,
    tenant_id: Option<Uuid>,
    options: ScanOptions,
) -> Result<DetectionResult, ScanError> {
    let tenant_label = tenant_id.map_or_else(|| "all".to_string(), |t| t.to_string());
    let timer = Timer::start();
    let scope = ObservationScope::with_fields("ops", "SCAN", &[("tenant", &tenant_label)]);
    metrics.increment_scans_started();

    let scanner = IntegrityScanner::with_options(store, options);
    match scanner.detect_all(tenant_id) {
        Ok(result) => {
            metrics.increment_scans_completed();
            metrics.add_violations_detected(result.summary.total_violations as u64);
            scope.complete(&[
                ("violations", &result.summary.total_violations.to_string()),
                ("elapsed_ms", &timer.elapsed_ms()),
            ]);
            Ok(result)
        }
        Err(ScanError::Cancelled) => {
            metrics.increment_scans_cancelled();
            scope.fail("cancelled");
            Err(ScanError::Cancelled)
        }
        Err(err) => {
            scope.fail(&err.to_string());
            Err(err)
        }
    }
}

/// Repair a violation subset (typically the warnings from a prior scan).
pub fn trigger_repair<S: DataAccess>(
    store: &S,
    metrics: &MetricsRegistry,
    violations: &[Violation],
) -> RepairReport {
    let timer = Timer::start();
    let scope = ObservationScope::with_fields(
        "ops",
        "REPAIR",
        &[("violations", &violations.len().to_string())],
    );
    metrics.add_repairs_attempted(violations.len() as u64);

    let report = RepairEngine::new(store).repair(violations);

    metrics.add_repairs_succeeded(report.repaired as u64);
    metrics.add_repairs_failed(report.failed as u64);
    scope.complete(&[
        ("repaired", &report.repaired.to_string()),
        ("failed", &report.failed.to_string()),
        ("elapsed_ms", &timer.elapsed_ms()),
    ]);

    report
}

fn record_write_check(metrics: &MetricsRegistry, record_kind: &str, errors: &[String]) {
    metrics.increment_writes_checked();
    if !errors.is_empty() {
        metrics.increment_writes_rejected();
        Logger::warn(
            "ops",
            "WRITE_REJECTED",
            &[
                ("errors", &errors.join("; ")),
                ("record_kind", record_kind),
            ],
        );
    }
}

/// Write-path entry: validate an entity before the caller persists it.
///
/// A non-empty result must block the write; every string reaches the
/// caller.
pub fn check_entity_write(
    registry: &SchemaRegistry,
    metrics: &MetricsRegistry,
    entity: &Entity,
    now: DateTime<Utc>,
) -> Vec<String> {
    let errors = writecheck::check_entity(registry, entity, now);
    record_write_check(metrics, "entity", &errors);
    errors
}

/// Write-path entry: validate a relationship before persisting.
pub fn check_relationship_write(
    registry: &SchemaRegistry,
    metrics: &MetricsRegistry,
    relationship: &Relationship,
    now: DateTime<Utc>,
) -> Vec<String> {
    let errors = writecheck::check_relationship(registry, relationship, now);
    record_write_check(metrics, "relationship", &errors);
    errors
}

/// Write-path entry: validate an event before appending.
pub fn check_event_write(
    registry: &SchemaRegistry,
    metrics: &MetricsRegistry,
    event: &Event,
    now: DateTime<Utc>,
) -> Vec<String> {
    let errors = writecheck::check_event(registry, event, now);
    record_write_check(metrics, "event", &errors);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tenant;
    use crate::scanner::Severity;
    use crate::store::MemoryStore;

    #[test]
    fn test_trigger_scan_reports_and_counts() {
        let store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let tenant = Tenant::new("acme");
        store.insert_relationship(Relationship::new(
            tenant.id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            "owns",
        ));

        let result = trigger_scan(&store, &metrics, None, ScanOptions::default()).unwrap();
        assert_eq!(result.summary.total_violations, 2);

        let snap = metrics.snapshot();
        assert_eq!(snap.scans_started, 1);
        assert_eq!(snap.scans_completed, 1);
        assert_eq!(snap.violations_detected, 2);
    }

    #[test]
    fn test_trigger_scan_cancelled_counts() {
        let store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let tenant = Tenant::new("acme");
        store.insert_event(Event::new(tenant.id, "thing_created"));

        let options = ScanOptions::default();
        options.cancel.cancel();

        let result = trigger_scan(&store, &metrics, None, options);
        assert!(matches!(result, Err(ScanError::Cancelled)));
        assert_eq!(metrics.snapshot().scans_cancelled, 1);
    }

    #[test]
    fn test_scan_then_repair_flow() {
        let store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let tenant = Tenant::new("acme");
        let mut event = Event::new(tenant.id, "thing_deleted");
        event.actor_id = Some(Uuid::new_v4());
        store.insert_event(event);

        let result = trigger_scan(&store, &metrics, None, ScanOptions::default()).unwrap();
        let warnings: Vec<Violation> = result
            .violations
            .into_iter()
            .filter(|v| v.severity == Severity::Warning)
            .collect();

        let report = trigger_repair(&store, &metrics, &warnings);
        assert_eq!(report.repaired, 1);
        assert_eq!(report.failed, 0);

        let snap = metrics.snapshot();
        assert_eq!(snap.repairs_attempted, 1);
        assert_eq!(snap.repairs_succeeded, 1);
    }

    #[test]
    fn test_write_checks_count_rejections() {
        let registry = SchemaRegistry::with_builtins();
        let metrics = MetricsRegistry::new();
        let tenant = Tenant::new("acme");

        // token_minted requires metadata.protocol; an empty bag fails.
        let bad_event = Event::new(tenant.id, "token_minted");
        let errors = check_event_write(&registry, &metrics, &bad_event, Utc::now());
        assert!(!errors.is_empty());

        let good_entity = Entity::new(tenant.id, "creator", "alice");
        let errors = check_entity_write(&registry, &metrics, &good_entity, Utc::now());
        assert!(errors.is_empty());

        let snap = metrics.snapshot();
        assert_eq!(snap.writes_checked, 2);
        assert_eq!(snap.writes_rejected, 1);
    }

    #[test]
    fn test_detection_result_is_json_serializable() {
        let store = MemoryStore::new();
        let metrics = MetricsRegistry::new();

        let result = trigger_scan(&store, &metrics, None, ScanOptions::default()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("total_violations"));
    }
}
