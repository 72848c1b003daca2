//! In-memory store for tests and embedders.
//!
//! Backed by plain maps behind a mutex. Listings are returned in
//! insertion order so test assertions are deterministic.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::model::{Entity, Event, Knowledge, KnowledgeAssociation, Relationship, Tenant};

use super::access::DataAccess;
use super::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Records {
    tenants: HashMap<Uuid, Tenant>,
    entities: HashMap<Uuid, Entity>,
    knowledge: HashMap<Uuid, Knowledge>,
    relationships: Vec<Relationship>,
    events: Vec<Event>,
    associations: Vec<KnowledgeAssociation>,
}

/// A `DataAccess` implementation holding all records in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tenant(&self, tenant: Tenant) {
        self.records.lock().unwrap().tenants.insert(tenant.id, tenant);
    }

    pub fn insert_entity(&self, entity: Entity) {
        self.records.lock().unwrap().entities.insert(entity.id, entity);
    }

    pub fn insert_knowledge(&self, knowledge: Knowledge) {
        self.records
            .lock()
            .unwrap()
            .knowledge
            .insert(knowledge.id, knowledge);
    }

    pub fn insert_relationship(&self, relationship: Relationship) {
        self.records.lock().unwrap().relationships.push(relationship);
    }

    pub fn insert_event(&self, event: Event) {
        self.records.lock().unwrap().events.push(event);
    }

    pub fn insert_association(&self, association: KnowledgeAssociation) {
        self.records.lock().unwrap().associations.push(association);
    }

    /// Remove an entity directly, bypassing `delete_record`.
    ///
    /// Simulates the hard deletes performed by external callers that
    /// leave dangling references behind.
    pub fn remove_entity(&self, id: Uuid) -> bool {
        self.records.lock().unwrap().entities.remove(&id).is_some()
    }

    pub fn entity_count(&self) -> usize {
        self.records.lock().unwrap().entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.records.lock().unwrap().relationships.len()
    }

    pub fn event_count(&self) -> usize {
        self.records.lock().unwrap().events.len()
    }

    pub fn association_count(&self) -> usize {
        self.records.lock().unwrap().associations.len()
    }
}

impl DataAccess for MemoryStore {
    fn get_entity(&self, id: Uuid) -> StoreResult<Option<Entity>> {
        Ok(self.records.lock().unwrap().entities.get(&id).cloned())
    }

    fn get_knowledge(&self, id: Uuid) -> StoreResult<Option<Knowledge>> {
        Ok(self.records.lock().unwrap().knowledge.get(&id).cloned())
    }

    fn list_relationships(&self, tenant_id: Option<Uuid>) -> StoreResult<Vec<Relationship>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .relationships
            .iter()
            .filter(|r| tenant_id.map_or(true, |t| r.tenant_id == t))
            .cloned()
            .collect())
    }

    fn list_events(&self, tenant_id: Option<Uuid>) -> StoreResult<Vec<Event>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .events
            .iter()
            .filter(|e| tenant_id.map_or(true, |t| e.tenant_id == t))
            .cloned()
            .collect())
    }

    fn list_knowledge_associations(&self) -> StoreResult<Vec<KnowledgeAssociation>> {
        Ok(self.records.lock().unwrap().associations.clone())
    }

    fn delete_record(&self, id: Uuid) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap();

        if records.entities.remove(&id).is_some() || records.knowledge.remove(&id).is_some() {
            return Ok(());
        }
        if let Some(pos) = records.relationships.iter().position(|r| r.id == id) {
            records.relationships.remove(pos);
            return Ok(());
        }
        if let Some(pos) = records.events.iter().position(|e| e.id == id) {
            records.events.remove(pos);
            return Ok(());
        }
        if let Some(pos) = records.associations.iter().position(|a| a.id == id) {
            records.associations.remove(pos);
            return Ok(());
        }
        if records.tenants.remove(&id).is_some() {
            return Ok(());
        }

        Err(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> (MemoryStore, Tenant, Entity) {
        let store = MemoryStore::new();
        let tenant = Tenant::new("acme");
        let entity = Entity::new(tenant.id, "creator", "alice");
        store.insert_tenant(tenant.clone());
        store.insert_entity(entity.clone());
        (store, tenant, entity)
    }

    #[test]
    fn test_get_entity_roundtrip() {
        let (store, _tenant, entity) = seeded_store();
        let found = store.get_entity(entity.id).unwrap();
        assert_eq!(found, Some(entity));
    }

    #[test]
    fn test_get_entity_absent() {
        let (store, _tenant, _entity) = seeded_store();
        assert!(store.get_entity(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_relationships_filters_by_tenant() {
        let (store, tenant, entity) = seeded_store();
        let other_tenant = Tenant::new("globex");
        let other_entity = Entity::new(other_tenant.id, "creator", "bob");

        store.insert_relationship(Relationship::new(
            tenant.id,
            entity.id,
            entity.id,
            "references",
        ));
        store.insert_relationship(Relationship::new(
            other_tenant.id,
            other_entity.id,
            other_entity.id,
            "references",
        ));

        assert_eq!(store.list_relationships(None).unwrap().len(), 2);
        assert_eq!(store.list_relationships(Some(tenant.id)).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_record_each_kind() {
        let (store, tenant, entity) = seeded_store();
        let knowledge = Knowledge::new(tenant.id, "notes");
        let relationship = Relationship::new(tenant.id, entity.id, entity.id, "references");
        let event = Event::new(tenant.id, "thing_created");
        let association = KnowledgeAssociation::new(entity.id, knowledge.id);

        store.insert_knowledge(knowledge.clone());
        store.insert_relationship(relationship.clone());
        store.insert_event(event.clone());
        store.insert_association(association);

        store.delete_record(relationship.id).unwrap();
        store.delete_record(event.id).unwrap();
        store.delete_record(association.id).unwrap();
        store.delete_record(knowledge.id).unwrap();
        store.delete_record(entity.id).unwrap();

        assert_eq!(store.relationship_count(), 0);
        assert_eq!(store.event_count(), 0);
        assert_eq!(store.association_count(), 0);
        assert_eq!(store.entity_count(), 0);
    }

    #[test]
    fn test_delete_absent_record_is_not_found() {
        let store = MemoryStore::new();
        let result = store.delete_record(Uuid::new_v4());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
