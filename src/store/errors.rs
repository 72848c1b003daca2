//! # Store Errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the data access layer
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error means the record is already absent.
    ///
    /// Repair treats this as success: the scan and repair steps are not
    /// transactionally linked, so the record may have been removed in
    /// between.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let id = Uuid::new_v4();
        assert!(StoreError::NotFound(id).is_not_found());
        assert!(!StoreError::Backend("disk on fire".into()).is_not_found());
    }

    #[test]
    fn test_display_includes_id() {
        let id = Uuid::new_v4();
        let msg = StoreError::NotFound(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }
}
