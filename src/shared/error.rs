//! Shared Error Types
//!
//! Errors raised before any request leaves the client, when a form or
//! payload fails validation.
//!
//! # Usage
//!
//! ```rust
//! use socialfeed::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Post content or image is required");
//! assert!(error.to_string().contains("content"));
//! ```
use thiserror::Error;

/// Errors shared by every layer of the client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Form or payload validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field that failed validation
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
        }
    }
}
