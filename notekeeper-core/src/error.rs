//! Error types for NOTEKEEPER operations

use crate::identity::NoteId;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Note not found: {id}")]
    NotFound { id: NoteId },

    #[error("Connection failed: {reason}")]
    Connection { reason: String },

    #[error("Query failed during {operation}: {reason}")]
    Query { operation: String, reason: String },

    #[error("Schema setup failed: {reason}")]
    Schema { reason: String },

    #[error("Row mapping failed: {reason}")]
    RowMapping { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors for client-supplied values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid note id: {input:?}")]
    InvalidId { input: String },

    #[error("title must be 1..20 characters")]
    InvalidTitle { length: usize },

    #[error("the description cannot be empty")]
    InvalidDescription,
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config file {path} could not be read: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_not_found() {
        let err = StorageError::NotFound {
            id: NoteId::new(12),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Note not found"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_storage_error_display_query() {
        let err = StorageError::Query {
            operation: "note_insert".to_string(),
            reason: "relation does not exist".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("note_insert"));
        assert!(msg.contains("relation does not exist"));
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::InvalidTitle { length: 21 }.to_string(),
            "title must be 1..20 characters"
        );
        assert_eq!(
            ValidationError::InvalidDescription.to_string(),
            "the description cannot be empty"
        );
        let msg = ValidationError::InvalidId {
            input: "abc".to_string(),
        }
        .to_string();
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "db_postgres.port".to_string(),
            value: "nope".to_string(),
            reason: "must be a port number".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("db_postgres.port"));
        assert!(msg.contains("nope"));
        assert!(msg.contains("must be a port number"));
    }
}
