//! Schema definitions held by the registry.
//!
//! A schema names the fields a payload must and may carry, an optional
//! custom predicate, and an optional protocol classification (e.g.
//! "payment", "commerce") used to group related types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom validation predicate run after the required-field check.
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Validation rule for one type tag.
pub struct TypeSchema {
    /// The type tag this schema validates (entity type, relationship
    /// type or event type).
    pub type_tag: String,
    /// Fields that must be present as keys in the payload. Presence
    /// only: an explicit `null` value counts as present.
    pub required_fields: Vec<String>,
    /// Fields the payload may carry. Informational; payloads are
    /// free-form extensible and unlisted keys are not rejected.
    pub optional_fields: Vec<String>,
    /// Optional custom predicate. Code-only, never loaded from disk.
    pub predicate: Option<Predicate>,
    /// Optional protocol classification.
    pub protocol: Option<String>,
}

impl TypeSchema {
    /// Create a schema with no field requirements.
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            required_fields: Vec::new(),
            optional_fields: Vec::new(),
            predicate: None,
            protocol: None,
        }
    }

    /// Set the required fields.
    pub fn required(mut self, fields: &[&str]) -> Self {
        self.required_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Set the optional fields.
    pub fn optional(mut self, fields: &[&str]) -> Self {
        self.optional_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Set the protocol classification.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Attach a custom predicate.
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Validates the schema definition itself (not a payload).
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.type_tag.trim().is_empty() {
            return Err("type tag must not be empty".into());
        }
        for field in &self.required_fields {
            if self.optional_fields.contains(field) {
                return Err(format!(
                    "field '{}' listed as both required and optional",
                    field
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeSchema")
            .field("type_tag", &self.type_tag)
            .field("required_fields", &self.required_fields)
            .field("optional_fields", &self.optional_fields)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("protocol", &self.protocol)
            .finish()
    }
}

/// Declarative schema as stored in schema files.
///
/// The predicate cannot be expressed declaratively, so a loaded schema
/// carries only fields and protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    pub type_tag: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub optional_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl From<SchemaDef> for TypeSchema {
    fn from(def: SchemaDef) -> Self {
        Self {
            type_tag: def.type_tag,
            required_fields: def.required_fields,
            optional_fields: def.optional_fields,
            predicate: None,
            protocol: def.protocol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_chain() {
        let schema = TypeSchema::new("payment")
            .required(&["amount", "currency"])
            .optional(&["memo"])
            .protocol("payment");

        assert_eq!(schema.type_tag, "payment");
        assert_eq!(schema.required_fields, vec!["amount", "currency"]);
        assert_eq!(schema.optional_fields, vec!["memo"]);
        assert_eq!(schema.protocol.as_deref(), Some("payment"));
        assert!(schema.predicate.is_none());
    }

    #[test]
    fn test_structure_rejects_empty_tag() {
        let schema = TypeSchema::new("  ");
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_structure_rejects_required_optional_overlap() {
        let schema = TypeSchema::new("payment")
            .required(&["amount"])
            .optional(&["amount"]);
        let result = schema.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("amount"));
    }

    #[test]
    fn test_predicate_runs_against_payload() {
        let schema = TypeSchema::new("payment")
            .predicate(|payload| payload.get("amount").and_then(Value::as_i64).unwrap_or(0) > 0);

        let pred = schema.predicate.as_ref().unwrap();
        assert!(pred(&json!({"amount": 5})));
        assert!(!pred(&json!({"amount": -5})));
    }

    #[test]
    fn test_schema_def_deserializes_with_defaults() {
        let def: SchemaDef = serde_json::from_str(r#"{"type_tag": "note"}"#).unwrap();
        assert_eq!(def.type_tag, "note");
        assert!(def.required_fields.is_empty());
        assert!(def.protocol.is_none());
    }
}
