//! Violation classification and scan results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a detected violation.
///
/// `Warning` marks records the repair engine may delete automatically.
/// `Error` marks violations that require manual review; the repair
/// engine refuses to touch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// The classified violation kinds.
///
/// Relationship-integrity violations are always errors while the
/// analogous event-integrity violations are warnings: events form an
/// append-only audit trail that must survive referent deletion, so a
/// dangling actor/target there is expected wear. Tenant mismatches are
/// errors for every record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    RelationshipMissingFrom,
    RelationshipMissingTo,
    RelationshipFromTenantMismatch,
    RelationshipToTenantMismatch,
    RelationshipEndpointTenantMismatch,
    EventMissingActor,
    EventMissingTarget,
    EventActorTenantMismatch,
    EventTargetTenantMismatch,
    AssociationMissingEntity,
    AssociationMissingKnowledge,
    AssociationTenantMismatch,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::RelationshipMissingFrom => "relationship_missing_from",
            ViolationKind::RelationshipMissingTo => "relationship_missing_to",
            ViolationKind::RelationshipFromTenantMismatch => "relationship_from_tenant_mismatch",
            ViolationKind::RelationshipToTenantMismatch => "relationship_to_tenant_mismatch",
            ViolationKind::RelationshipEndpointTenantMismatch => {
                "relationship_endpoint_tenant_mismatch"
            }
            ViolationKind::EventMissingActor => "event_missing_actor",
            ViolationKind::EventMissingTarget => "event_missing_target",
            ViolationKind::EventActorTenantMismatch => "event_actor_tenant_mismatch",
            ViolationKind::EventTargetTenantMismatch => "event_target_tenant_mismatch",
            ViolationKind::AssociationMissingEntity => "association_missing_entity",
            ViolationKind::AssociationMissingKnowledge => "association_missing_knowledge",
            ViolationKind::AssociationTenantMismatch => "association_tenant_mismatch",
        }
    }

    /// The severity this kind carries.
    pub fn default_severity(&self) -> Severity {
        match self {
            ViolationKind::RelationshipMissingFrom
            | ViolationKind::RelationshipMissingTo
            | ViolationKind::RelationshipFromTenantMismatch
            | ViolationKind::RelationshipToTenantMismatch
            | ViolationKind::RelationshipEndpointTenantMismatch
            | ViolationKind::EventActorTenantMismatch
            | ViolationKind::EventTargetTenantMismatch
            | ViolationKind::AssociationTenantMismatch => Severity::Error,
            ViolationKind::EventMissingActor
            | ViolationKind::EventMissingTarget
            | ViolationKind::AssociationMissingEntity
            | ViolationKind::AssociationMissingKnowledge => Severity::Warning,
        }
    }

    /// Whether this kind marks a record crossing a tenant boundary.
    pub fn is_cross_tenant(&self) -> bool {
        matches!(
            self,
            ViolationKind::RelationshipFromTenantMismatch
                | ViolationKind::RelationshipToTenantMismatch
                | ViolationKind::RelationshipEndpointTenantMismatch
                | ViolationKind::EventActorTenantMismatch
                | ViolationKind::EventTargetTenantMismatch
                | ViolationKind::AssociationTenantMismatch
        )
    }
}

/// A detected integrity or isolation inconsistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Id of the offending record (the relationship, event or
    /// association, never the referent).
    pub record_id: Uuid,
    pub reason: String,
    pub severity: Severity,
    /// Entity ids implicated by the violation (dangling referents,
    /// mismatched endpoints).
    pub affected_entity_ids: Vec<Uuid>,
    /// Operator guidance. Advisory only; repair policy keys off
    /// `severity`, not this text.
    pub recommendation: String,
}

impl Violation {
    pub fn new(
        kind: ViolationKind,
        record_id: Uuid,
        reason: impl Into<String>,
        affected_entity_ids: Vec<Uuid>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            record_id,
            reason: reason.into(),
            severity: kind.default_severity(),
            affected_entity_ids,
            recommendation: recommendation.into(),
        }
    }
}

/// Aggregated counts over a violation set.
///
/// Maps are ordered so serialized summaries are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_violations: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_severity: BTreeMap<String, usize>,
}

impl ScanSummary {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut summary = Self {
            total_violations: violations.len(),
            ..Self::default()
        };
        for violation in violations {
            *summary
                .by_type
                .entry(violation.kind.as_str().to_string())
                .or_insert(0) += 1;
            *summary
                .by_severity
                .entry(violation.severity.as_str().to_string())
                .or_insert(0) += 1;
        }
        summary
    }
}

/// The full output of a detection run. JSON-serializable for the
/// operational surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub timestamp: DateTime<Utc>,
    pub violations: Vec<Violation>,
    pub summary: ScanSummary,
}
