//! Write-path validation glue.
//!
//! The write path calls these before persisting a record: schema checks
//! against the registry plus temporal checks, combined into one error
//! list. A non-empty result must block the write and every string must
//! reach the caller.
//!
//! Schema validation applies only when a schema is registered for the
//! record's type tag: payloads are free-form extensible, and an
//! unregistered tag constrains nothing at the write path. (The registry
//! itself reports unknown tags; operational tooling that wants strict
//! tag checking calls `SchemaRegistry::validate` directly.)

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::{Entity, Event, Relationship};
use crate::registry::SchemaRegistry;
use crate::temporal;

fn schema_errors(registry: &SchemaRegistry, type_tag: &str, bag: &crate::model::PropertyBag) -> Vec<String> {
    if !registry.has_schema(type_tag) {
        return Vec::new();
    }
    registry.validate(type_tag, &Value::Object(bag.clone()))
}

/// Validate an entity before create/update.
pub fn check_entity(registry: &SchemaRegistry, entity: &Entity, now: DateTime<Utc>) -> Vec<String> {
    let mut errors = schema_errors(registry, &entity.type_tag, &entity.properties);

    if let Err(e) = temporal::validate_entity_timestamps(entity.created_at, entity.updated_at, now)
    {
        errors.push(e);
    }
    if let Some(deleted_at) = entity.deleted_at {
        if let Err(e) = temporal::validate_deletion_timestamp(
            deleted_at,
            entity.created_at,
            entity.updated_at,
            now,
        ) {
            errors.push(e);
        }
    }

    errors
}

/// Validate a relationship before create/update.
pub fn check_relationship(
    registry: &SchemaRegistry,
    relationship: &Relationship,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut errors = schema_errors(
        registry,
        &relationship.relationship_type,
        &relationship.metadata,
    );

    if let Err(e) = temporal::validate_window(relationship.valid_from, relationship.valid_to) {
        errors.push(e);
    }
    if let Err(e) = temporal::validate_timestamp(relationship.created_at, now, false) {
        errors.push(e);
    }

    errors
}

/// Validate an event before append.
pub fn check_event(registry: &SchemaRegistry, event: &Event, now: DateTime<Utc>) -> Vec<String> {
    let mut errors = schema_errors(registry, &event.event_type, &event.metadata);

    if let Err(e) = temporal::validate_timestamp(event.timestamp, now, false) {
        errors.push(e);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tenant;
    use crate::registry::TypeSchema;
    use chrono::Duration;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let registry = SchemaRegistry::new();
        registry
            .register(TypeSchema::new("payment").required(&["amount", "currency"]))
            .unwrap();
        registry
            .register(TypeSchema::new("payment_completed").required(&["amount"]))
            .unwrap();
        registry
    }

    #[test]
    fn test_entity_all_checks_pass() {
        let registry = registry();
        let tenant = Tenant::new("acme");
        let mut entity = Entity::new(tenant.id, "payment", "inv-1");
        entity.properties.insert("amount".into(), json!(100));
        entity.properties.insert("currency".into(), json!("USD"));

        assert!(check_entity(&registry, &entity, Utc::now()).is_empty());
    }

    #[test]
    fn test_entity_schema_and_temporal_errors_accumulate() {
        let registry = registry();
        let tenant = Tenant::new("acme");
        let mut entity = Entity::new(tenant.id, "payment", "inv-1");
        // Missing both required fields, and updated_at before created_at.
        entity.updated_at = entity.created_at - Duration::hours(1);

        let errors = check_entity(&registry, &entity, Utc::now());
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_entity_unregistered_tag_skips_schema() {
        let registry = registry();
        let tenant = Tenant::new("acme");
        let entity = Entity::new(tenant.id, "freeform_note", "scratch");

        assert!(check_entity(&registry, &entity, Utc::now()).is_empty());
    }

    #[test]
    fn test_relationship_inverted_window_rejected() {
        let registry = registry();
        let tenant = Tenant::new("acme");
        let mut rel = Relationship::new(tenant.id, uuid::Uuid::new_v4(), uuid::Uuid::new_v4(), "owns");
        let now = Utc::now();
        rel.valid_from = Some(now + Duration::days(2));
        rel.valid_to = Some(now + Duration::days(1));

        let errors = check_relationship(&registry, &rel, now);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("inverted"));
    }

    #[test]
    fn test_event_future_timestamp_rejected() {
        let registry = registry();
        let tenant = Tenant::new("acme");
        let mut event = Event::new(tenant.id, "payment_completed");
        event.metadata.insert("amount".into(), json!(100));
        let now = Utc::now();
        event.timestamp = now + Duration::minutes(5);

        let errors = check_event(&registry, &event, now);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("future"));
    }

    #[test]
    fn test_event_missing_required_metadata_blocks() {
        let registry = registry();
        let tenant = Tenant::new("acme");
        let mut event = Event::new(tenant.id, "payment_completed");
        event.timestamp = Utc::now() - Duration::seconds(1);

        let errors = check_event(&registry, &event, Utc::now());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("amount"));
    }
}
