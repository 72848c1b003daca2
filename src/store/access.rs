//! The `DataAccess` trait consumed by the scanner and repair engine.

use uuid::Uuid;

use crate::model::{Entity, Event, Knowledge, KnowledgeAssociation, Relationship};

use super::errors::StoreResult;

/// Narrow read/write interface over the graph store.
///
/// Lookups return `Ok(None)` for hard-deleted (absent) records;
/// soft-deleted records are returned like any other, since they are
/// retained by the store and remain valid referents.
///
/// Implementations must be safe to share across threads: per-tenant
/// scans are data-independent and may run concurrently.
pub trait DataAccess: Send + Sync {
    /// Resolve an entity by id.
    fn get_entity(&self, id: Uuid) -> StoreResult<Option<Entity>>;

    /// Resolve a knowledge record by id.
    fn get_knowledge(&self, id: Uuid) -> StoreResult<Option<Knowledge>>;

    /// List relationships, optionally restricted to one tenant.
    fn list_relationships(&self, tenant_id: Option<Uuid>) -> StoreResult<Vec<Relationship>>;

    /// List events, optionally restricted to one tenant.
    fn list_events(&self, tenant_id: Option<Uuid>) -> StoreResult<Vec<Event>>;

    /// List knowledge associations.
    ///
    /// Associations carry no tenant column; scope is attributed through
    /// the entity and knowledge records they reference.
    fn list_knowledge_associations(&self) -> StoreResult<Vec<KnowledgeAssociation>>;

    /// Hard-delete a record of any kind by id.
    ///
    /// Returns `StoreError::NotFound` if no record has this id.
    fn delete_record(&self, id: Uuid) -> StoreResult<()>;
}
