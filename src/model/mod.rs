//! Record types for the entity graph
//!
//! Per ONTOLOGY.md, the store holds five record kinds:
//! - Tenant: isolation boundary, optionally nested under a parent
//! - Entity: typed, named record with a free-form properties bag
//! - Relationship: typed directed edge between two entities
//! - Event: immutable, typed, timestamped audit record
//! - KnowledgeAssociation: link from an entity to a knowledge record
//!
//! Records reference each other by opaque id only. Resolution happens
//! through the `DataAccess` trait on demand, so a dangling reference is
//! data to be classified, never a crash.

mod record;

pub use record::{
    Entity, Event, Knowledge, KnowledgeAssociation, PropertyBag, Relationship, Tenant,
};
