//! The five record kinds held by the graph store.
//!
//! Every record belongs to exactly one tenant, directly or (for
//! relationships, events and associations) transitively through the
//! entities it references. Entities and relationships support
//! soft-delete (`deleted_at` set, record retained); events are
//! append-only and never deleted by the write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Free-form properties/metadata bag carried by entities, relationships
/// and events. Validated against the schema registry entry for the
/// record's type tag, if one is registered.
pub type PropertyBag = Map<String, Value>;

/// Isolation boundary partitioning all other records.
///
/// Tenants may nest via `parent_id`; isolation checks compare tenant ids
/// for equality and do not traverse the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a root tenant.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a tenant nested under `parent`.
    pub fn nested_under(parent: &Tenant, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: Some(parent.id),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// A typed, named record scoped to one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub type_tag: String,
    pub name: String,
    pub properties: PropertyBag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity {
    /// Create an entity with an empty properties bag, stamped now.
    pub fn new(tenant_id: Uuid, type_tag: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            type_tag: type_tag.into(),
            name: name.into(),
            properties: PropertyBag::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the entity is soft-deleted.
    ///
    /// A soft-deleted entity is still a resolvable referent; only hard
    /// deletion (removal from the store) produces dangling references.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A typed directed edge between two entities.
///
/// Invariant: `from_entity.tenant_id == to_entity.tenant_id ==
/// relationship.tenant_id`. The optional validity window bounds when the
/// edge is in effect; an unset bound is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub from_entity_id: Uuid,
    pub to_entity_id: Uuid,
    pub relationship_type: String,
    pub metadata: PropertyBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Relationship {
    /// Create a relationship with no validity window, stamped now.
    pub fn new(
        tenant_id: Uuid,
        from_entity_id: Uuid,
        to_entity_id: Uuid,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            from_entity_id,
            to_entity_id,
            relationship_type: relationship_type.into(),
            metadata: PropertyBag::new(),
            valid_from: None,
            valid_to: None,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }
}

/// An immutable, typed, timestamped audit record.
///
/// `actor_id`/`target_id` are soft references: the audit trail must
/// survive referent deletion, so a dangling reference here is tolerated
/// (classified as a warning, not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub metadata: PropertyBag,
}

impl Event {
    /// Create an event with no actor/target, stamped now.
    pub fn new(tenant_id: Uuid, event_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            event_type: event_type.into(),
            actor_id: None,
            target_id: None,
            timestamp: Utc::now(),
            metadata: PropertyBag::new(),
        }
    }
}

/// A knowledge record referenced by associations.
///
/// Only its id and tenant matter to this engine; content is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knowledge {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub content: String,
}

impl Knowledge {
    pub fn new(tenant_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            content: content.into(),
        }
    }
}

/// Link from an entity to a knowledge record.
///
/// Carries no tenant of its own; it inherits tenant scope from the
/// entity (and the knowledge record) it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeAssociation {
    pub id: Uuid,
    pub entity_id: Uuid,
    pub knowledge_id: Uuid,
}

impl KnowledgeAssociation {
    pub fn new(entity_id: Uuid, knowledge_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id,
            knowledge_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_soft_delete_flag() {
        let tenant = Tenant::new("acme");
        let mut entity = Entity::new(tenant.id, "blog_post", "launch announcement");
        assert!(!entity.is_deleted());

        entity.deleted_at = Some(Utc::now());
        assert!(entity.is_deleted());
    }

    #[test]
    fn test_nested_tenant_links_parent() {
        let root = Tenant::new("acme");
        let child = Tenant::nested_under(&root, "acme-eu");
        assert_eq!(child.parent_id, Some(root.id));
    }

    #[test]
    fn test_entity_roundtrips_through_json() {
        let tenant = Tenant::new("acme");
        let mut entity = Entity::new(tenant.id, "payment", "invoice-42");
        entity
            .properties
            .insert("amount".into(), json!(1250));

        let encoded = serde_json::to_string(&entity).unwrap();
        let decoded: Entity = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, entity);
    }

    #[test]
    fn test_optional_fields_omitted_when_unset() {
        let tenant = Tenant::new("acme");
        let event = Event::new(tenant.id, "thing_created");

        let encoded = serde_json::to_string(&event).unwrap();
        assert!(!encoded.contains("actor_id"));
        assert!(!encoded.contains("target_id"));
    }
}
