//! The scan pass over relationships, events and knowledge associations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Event, KnowledgeAssociation, Relationship};
use crate::store::{DataAccess, StoreError};

use super::violation::{DetectionResult, ScanSummary, Violation, ViolationKind};

/// Cooperative cancellation flag, checked between batches.
///
/// Scanning has no side effects, so aborting mid-scan is always safe;
/// the caller simply re-runs later.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The scan stops at the next batch boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Scan tuning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Records examined between cancellation checks.
    pub batch_size: usize,
    pub cancel: CancelToken,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            batch_size: 500,
            cancel: CancelToken::new(),
        }
    }
}

/// Scan failure modes
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Scan cancelled")]
    Cancelled,
}

/// Walks the store and classifies integrity violations.
///
/// Read-only against `DataAccess`. Per-tenant scans are
/// data-independent and may run concurrently; the cross-tenant scan is
/// a single unpartitioned pass, since its purpose is to find edges that
/// cross partition boundaries.
pub struct IntegrityScanner<'a, S: DataAccess> {
    store: &'a S,
    options: ScanOptions,
}

impl<'a, S: DataAccess> IntegrityScanner<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_options(store, ScanOptions::default())
    }

    pub fn with_options(store: &'a S, options: ScanOptions) -> Self {
        Self { store, options }
    }

    fn checkpoint(&self) -> Result<(), ScanError> {
        if self.options.cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        Ok(())
    }

    fn batch_size(&self) -> usize {
        self.options.batch_size.max(1)
    }

    /// Scan relationships for dangling endpoints and tenant breaks.
    pub fn scan_relationships(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<Violation>, ScanError> {
        let relationships = self.store.list_relationships(tenant_id)?;
        let mut violations = Vec::new();

        for batch in relationships.chunks(self.batch_size()) {
            self.checkpoint()?;
            for relationship in batch {
                self.check_relationship(relationship, &mut violations)?;
            }
        }

        Ok(violations)
    }

    fn check_relationship(
        &self,
        relationship: &Relationship,
        violations: &mut Vec<Violation>,
    ) -> Result<(), ScanError> {
        let from = self.store.get_entity(relationship.from_entity_id)?;
        let to = self.store.get_entity(relationship.to_entity_id)?;

        if from.is_none() {
            violations.push(Violation::new(
                ViolationKind::RelationshipMissingFrom,
                relationship.id,
                format!(
                    "relationship {} references missing source entity {}",
                    relationship.id, relationship.from_entity_id
                ),
                vec![relationship.from_entity_id],
                "delete the relationship; the dangling endpoint cannot be recovered",
            ));
        }
        if to.is_none() {
            violations.push(Violation::new(
                ViolationKind::RelationshipMissingTo,
                relationship.id,
                format!(
                    "relationship {} references missing target entity {}",
                    relationship.id, relationship.to_entity_id
                ),
                vec![relationship.to_entity_id],
                "delete the relationship; the dangling endpoint cannot be recovered",
            ));
        }

        let (Some(from), Some(to)) = (from, to) else {
            return Ok(());
        };

        // Cross-tenant edges break a security boundary. Three distinct
        // subtypes so operators can see which leg is wrong.
        if from.tenant_id != relationship.tenant_id {
            violations.push(Violation::new(
                ViolationKind::RelationshipFromTenantMismatch,
                relationship.id,
                format!(
                    "source entity {} belongs to tenant {} but relationship {} belongs to tenant {}",
                    from.id, from.tenant_id, relationship.id, relationship.tenant_id
                ),
                vec![from.id],
                "manual review required; cross-tenant references are never auto-repaired",
            ));
        }
        if to.tenant_id != relationship.tenant_id {
            violations.push(Violation::new(
                ViolationKind::RelationshipToTenantMismatch,
                relationship.id,
                format!(
                    "target entity {} belongs to tenant {} but relationship {} belongs to tenant {}",
                    to.id, to.tenant_id, relationship.id, relationship.tenant_id
                ),
                vec![to.id],
                "manual review required; cross-tenant references are never auto-repaired",
            ));
        }
        if from.tenant_id != to.tenant_id {
            violations.push(Violation::new(
                ViolationKind::RelationshipEndpointTenantMismatch,
                relationship.id,
                format!(
                    "relationship {} connects entities from tenants {} and {}",
                    relationship.id, from.tenant_id, to.tenant_id
                ),
                vec![from.id, to.id],
                "manual review required; cross-tenant references are never auto-repaired",
            ));
        }

        Ok(())
    }

    /// Scan events for dangling or cross-tenant actor/target references.
    pub fn scan_events(&self, tenant_id: Option<Uuid>) -> Result<Vec<Violation>, ScanError> {
        let events = self.store.list_events(tenant_id)?;
        let mut violations = Vec::new();

        for batch in events.chunks(self.batch_size()) {
            self.checkpoint()?;
            for event in batch {
                self.check_event(event, &mut violations)?;
            }
        }

        Ok(violations)
    }

    fn check_event(&self, event: &Event, violations: &mut Vec<Violation>) -> Result<(), ScanError> {
        self.check_event_referent(
            event,
            event.actor_id,
            ViolationKind::EventMissingActor,
            ViolationKind::EventActorTenantMismatch,
            "actor",
            violations,
        )?;
        self.check_event_referent(
            event,
            event.target_id,
            ViolationKind::EventMissingTarget,
            ViolationKind::EventTargetTenantMismatch,
            "target",
            violations,
        )
    }

    fn check_event_referent(
        &self,
        event: &Event,
        referent_id: Option<Uuid>,
        missing_kind: ViolationKind,
        mismatch_kind: ViolationKind,
        role: &str,
        violations: &mut Vec<Violation>,
    ) -> Result<(), ScanError> {
        let Some(referent_id) = referent_id else {
            return Ok(());
        };

        match self.store.get_entity(referent_id)? {
            None => {
                // Downgraded to warning: the audit trail must survive
                // referent deletion.
                violations.push(Violation::new(
                    missing_kind,
                    event.id,
                    format!(
                        "event {} references missing {} entity {}",
                        event.id, role, referent_id
                    ),
                    vec![referent_id],
                    format!("clear the {} reference; retain the event for audit", role),
                ));
            }
            Some(entity) if entity.tenant_id != event.tenant_id => {
                violations.push(Violation::new(
                    mismatch_kind,
                    event.id,
                    format!(
                        "{} entity {} belongs to tenant {} but event {} belongs to tenant {}",
                        role, entity.id, entity.tenant_id, event.id, event.tenant_id
                    ),
                    vec![entity.id],
                    "manual review required; cross-tenant references are never auto-repaired",
                ));
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Scan knowledge associations for dangling or cross-tenant links.
    ///
    /// The association listing is global; tenant scope is attributed
    /// through whichever referent resolves. With both referents missing
    /// the association cannot be attributed, so it is reported by
    /// unfiltered scans only.
    pub fn scan_knowledge_associations(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<Violation>, ScanError> {
        let associations = self.store.list_knowledge_associations()?;
        let mut violations = Vec::new();

        for batch in associations.chunks(self.batch_size()) {
            self.checkpoint()?;
            for association in batch {
                self.check_association(association, tenant_id, &mut violations)?;
            }
        }

        Ok(violations)
    }

    fn check_association(
        &self,
        association: &KnowledgeAssociation,
        tenant_id: Option<Uuid>,
        violations: &mut Vec<Violation>,
    ) -> Result<(), ScanError> {
        let entity = self.store.get_entity(association.entity_id)?;
        let knowledge = self.store.get_knowledge(association.knowledge_id)?;

        let in_scope = |record_tenant: Uuid| tenant_id.map_or(true, |t| record_tenant == t);

        match (&entity, &knowledge) {
            (None, None) => {
                if tenant_id.is_none() {
                    violations.push(self.association_missing_entity(association));
                    violations.push(self.association_missing_knowledge(association));
                }
            }
            (None, Some(knowledge)) => {
                if in_scope(knowledge.tenant_id) {
                    violations.push(self.association_missing_entity(association));
                }
            }
            (Some(entity), None) => {
                if in_scope(entity.tenant_id) {
                    violations.push(self.association_missing_knowledge(association));
                }
            }
            (Some(entity), Some(knowledge)) if entity.tenant_id != knowledge.tenant_id => {
                if in_scope(entity.tenant_id) || in_scope(knowledge.tenant_id) {
                    violations.push(Violation::new(
                        ViolationKind::AssociationTenantMismatch,
                        association.id,
                        format!(
                            "association {} links entity {} (tenant {}) to knowledge {} (tenant {})",
                            association.id,
                            entity.id,
                            entity.tenant_id,
                            knowledge.id,
                            knowledge.tenant_id
                        ),
                        vec![entity.id],
                        "manual review required; cross-tenant references are never auto-repaired",
                    ));
                }
            }
            (Some(_), Some(_)) => {}
        }

        Ok(())
    }

    fn association_missing_entity(&self, association: &KnowledgeAssociation) -> Violation {
        Violation::new(
            ViolationKind::AssociationMissingEntity,
            association.id,
            format!(
                "association {} references missing entity {}",
                association.id, association.entity_id
            ),
            vec![association.entity_id],
            "delete the association",
        )
    }

    fn association_missing_knowledge(&self, association: &KnowledgeAssociation) -> Violation {
        Violation::new(
            ViolationKind::AssociationMissingKnowledge,
            association.id,
            format!(
                "association {} references missing knowledge record {}",
                association.id, association.knowledge_id
            ),
            vec![association.entity_id],
            "delete the association",
        )
    }

    /// Find every record crossing a tenant boundary.
    ///
    /// Always global: the scan runs unfiltered and keeps only the
    /// cross-tenant violation kinds. A tenant filter upstream would
    /// hide exactly the edges this check exists to find.
    pub fn scan_cross_tenant_references(&self) -> Result<Vec<Violation>, ScanError> {
        let mut violations = self.scan_relationships(None)?;
        violations.extend(self.scan_events(None)?);
        violations.extend(self.scan_knowledge_associations(None)?);
        violations.retain(|v| v.kind.is_cross_tenant());
        Ok(violations)
    }

    /// Run all scans and aggregate the result.
    pub fn detect_all(&self, tenant_id: Option<Uuid>) -> Result<DetectionResult, ScanError> {
        let mut violations = self.scan_relationships(tenant_id)?;
        violations.extend(self.scan_events(tenant_id)?);
        violations.extend(self.scan_knowledge_associations(tenant_id)?);

        let summary = ScanSummary::from_violations(&violations);
        Ok(DetectionResult {
            timestamp: Utc::now(),
            violations,
            summary,
        })
    }
}
