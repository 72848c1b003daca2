//! The runtime type-tag → schema table.
//!
//! Populated once at startup (built-ins plus schema files), read-mostly
//! thereafter. Registration stays available at runtime behind a write
//! lock; steady-state validation takes the read path only.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::errors::{RegistryError, RegistryResult};
use super::types::TypeSchema;

/// Cloneable, predicate-free view of a registered schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaInfo {
    pub type_tag: String,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    pub protocol: Option<String>,
    pub has_predicate: bool,
}

/// Runtime schema registry.
///
/// Validation never returns an error value: the result is a list of
/// human-readable problem strings, empty when the payload is valid. The
/// caller decides whether a non-empty result blocks the write.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, TypeSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in ontology tables.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        super::builtin::install(&registry);
        registry
    }

    /// Register a schema for a new type tag.
    ///
    /// Registered schemas are immutable: re-registering an existing tag
    /// is rejected rather than silently replacing the rule.
    pub fn register(&self, schema: TypeSchema) -> RegistryResult<()> {
        schema
            .validate_structure()
            .map_err(RegistryError::InvalidDefinition)?;

        let mut schemas = self.schemas.write().unwrap();
        if schemas.contains_key(&schema.type_tag) {
            return Err(RegistryError::AlreadyRegistered(schema.type_tag));
        }
        schemas.insert(schema.type_tag.clone(), schema);
        Ok(())
    }

    /// Validate a payload against the schema registered for `type_tag`.
    ///
    /// Unknown tags short-circuit with exactly one "unknown type" error.
    /// Otherwise every missing required field contributes one error
    /// (presence-only: an explicit `null` counts as present), and a
    /// failing predicate contributes a generic validation error. Errors
    /// accumulate; order is required fields first, then the predicate.
    pub fn validate(&self, type_tag: &str, payload: &Value) -> Vec<String> {
        let schemas = self.schemas.read().unwrap();

        let Some(schema) = schemas.get(type_tag) else {
            return vec![format!("unknown type: {}", type_tag)];
        };

        let mut errors = Vec::new();
        let fields = payload.as_object();

        for required in &schema.required_fields {
            let present = fields.map_or(false, |map| map.contains_key(required));
            if !present {
                errors.push(format!("missing required field: {}", required));
            }
        }

        if let Some(predicate) = &schema.predicate {
            if !predicate(payload) {
                errors.push(format!("validation failed for type {}", type_tag));
            }
        }

        errors
    }

    /// Look up the schema registered for a tag.
    pub fn get(&self, type_tag: &str) -> Option<SchemaInfo> {
        let schemas = self.schemas.read().unwrap();
        schemas.get(type_tag).map(|s| SchemaInfo {
            type_tag: s.type_tag.clone(),
            required_fields: s.required_fields.clone(),
            optional_fields: s.optional_fields.clone(),
            protocol: s.protocol.clone(),
            has_predicate: s.predicate.is_some(),
        })
    }

    /// Whether a schema is registered for the tag.
    pub fn has_schema(&self, type_tag: &str) -> bool {
        self.schemas.read().unwrap().contains_key(type_tag)
    }

    /// All tags whose schema carries the given protocol classification,
    /// sorted for deterministic output.
    pub fn filter_by_protocol(&self, protocol: &str) -> Vec<String> {
        let schemas = self.schemas.read().unwrap();
        let mut tags: Vec<String> = schemas
            .values()
            .filter(|s| s.protocol.as_deref() == Some(protocol))
            .map(|s| s.type_tag.clone())
            .collect();
        tags.sort();
        tags
    }

    /// Whether the tag's schema carries the given protocol.
    pub fn supports_protocol(&self, type_tag: &str, protocol: &str) -> bool {
        let schemas = self.schemas.read().unwrap();
        schemas
            .get(type_tag)
            .map_or(false, |s| s.protocol.as_deref() == Some(protocol))
    }

    /// Number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.read().unwrap().len()
    }

    /// All registered tags, sorted.
    pub fn type_tags(&self) -> Vec<String> {
        let schemas = self.schemas.read().unwrap();
        let mut tags: Vec<String> = schemas.keys().cloned().collect();
        tags.sort();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_registry() -> SchemaRegistry {
        let registry = SchemaRegistry::new();
        registry
            .register(
                TypeSchema::new("payment")
                    .required(&["amount", "currency"])
                    .optional(&["memo"])
                    .protocol("payment"),
            )
            .unwrap();
        registry
            .register(TypeSchema::new("blog_post").required(&["title"]))
            .unwrap();
        registry
    }

    #[test]
    fn test_valid_payload_passes() {
        let registry = sample_registry();
        let errors = registry.validate("payment", &json!({"amount": 100, "currency": "USD"}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_required_field_named_in_error() {
        let registry = sample_registry();
        let errors = registry.validate("payment", &json!({"amount": 100}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("currency"));
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let registry = sample_registry();
        let errors = registry.validate("payment", &json!({}));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_explicit_null_counts_as_present() {
        // The required-field check is presence-only.
        let registry = sample_registry();
        let errors = registry.validate("payment", &json!({"amount": null, "currency": null}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_type_short_circuits() {
        let registry = sample_registry();
        let errors = registry.validate("hologram", &json!({}));
        assert_eq!(errors, vec!["unknown type: hologram".to_string()]);
    }

    #[test]
    fn test_predicate_failure_emits_generic_error() {
        let registry = SchemaRegistry::new();
        registry
            .register(
                TypeSchema::new("payment")
                    .required(&["amount"])
                    .predicate(|p| p.get("amount").and_then(serde_json::Value::as_i64).unwrap_or(0) > 0),
            )
            .unwrap();

        let errors = registry.validate("payment", &json!({"amount": -10}));
        assert_eq!(errors, vec!["validation failed for type payment".to_string()]);
    }

    #[test]
    fn test_predicate_runs_even_when_fields_missing() {
        let registry = SchemaRegistry::new();
        registry
            .register(
                TypeSchema::new("payment")
                    .required(&["amount"])
                    .predicate(|_| false),
            )
            .unwrap();

        let errors = registry.validate("payment", &json!({}));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = sample_registry();
        let result = registry.register(TypeSchema::new("payment"));
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(_))));
    }

    #[test]
    fn test_non_object_payload_misses_required_fields() {
        let registry = sample_registry();
        let errors = registry.validate("payment", &json!("not an object"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_protocol_filters() {
        let registry = sample_registry();
        assert_eq!(registry.filter_by_protocol("payment"), vec!["payment"]);
        assert!(registry.supports_protocol("payment", "payment"));
        assert!(!registry.supports_protocol("blog_post", "payment"));
        assert!(!registry.supports_protocol("hologram", "payment"));
    }

    #[test]
    fn test_runtime_registration_extends_table() {
        let registry = sample_registry();
        assert!(!registry.has_schema("holo_scene"));

        registry
            .register(TypeSchema::new("holo_scene").required(&["resolution"]))
            .unwrap();

        assert!(registry.has_schema("holo_scene"));
        let errors = registry.validate("holo_scene", &json!({}));
        assert!(errors[0].contains("resolution"));
    }
}
