//! # Registry Errors
//!
//! These cover registration and schema-file loading only. Payload
//! validation never fails with an error value: `validate` returns the
//! accumulated list of human-readable problem strings, and an empty list
//! means the payload is valid.

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Type already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(String),

    #[error("Malformed schema file '{path}': {reason}")]
    MalformedFile { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RegistryError::AlreadyRegistered("payment".into());
        assert!(err.to_string().contains("payment"));

        let err = RegistryError::MalformedFile {
            path: "type_payment.json".into(),
            reason: "not JSON".into(),
        };
        assert!(err.to_string().contains("type_payment.json"));
        assert!(err.to_string().contains("not JSON"));
    }
}
