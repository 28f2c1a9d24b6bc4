//! Error types for the tracker core.
//!
//! Store operations fail with `StoreError`. Validation and not-found
//! failures never touch the collection or the durable store; persistence
//! failures surface whatever the storage backend reported.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::fields::Field;

/// One or more mandatory fields are missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Fields that failed, in declaration order. Empty for free-form messages.
    pub missing: Vec<Field>,
    pub message: Option<String>,
}

impl ValidationError {
    pub fn missing(missing: Vec<Field>) -> Self {
        Self {
            missing,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            missing: Vec::new(),
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref m) = self.message {
            return f.write_str(m);
        }
        let names: Vec<String> = self.missing.iter().map(|m| m.to_string()).collect();
        write!(f, "missing required field(s): {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Failure reading or writing the durable key-value store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O error on slot '{slot}': {source}")]
    Io {
        slot: String,
        #[source]
        source: io::Error,
    },

    #[error("could not decode slot '{slot}': {source}")]
    Decode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode slot '{slot}': {source}")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    /// Raised by the in-memory store when failure injection is switched on.
    #[error("write to slot '{0}' rejected")]
    Rejected(String),
}

/// Errors from store and tracker operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound {
        /// `"Task"` or `"SubTask"`.
        entity: &'static str,
        id: String,
    },

    #[error("'{identifier}' matches {count} tasks; use a longer id")]
    Ambiguous { identifier: String, count: usize },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }

    pub fn sub_task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "SubTask",
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(StoreError::task_not_found("abc").to_string(), "Task not found: abc");
        assert_eq!(
            StoreError::sub_task_not_found("s1").to_string(),
            "SubTask not found: s1"
        );
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = ValidationError::missing(vec![Field::Title, Field::DueDate]);
        assert_eq!(err.to_string(), "missing required field(s): title, dueDate");
        let err: StoreError = err.into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: missing required field(s): title, dueDate"
        );
    }
}
