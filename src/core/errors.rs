//! Error types for the simap-rs library.
//!
//! The extraction core itself is total: recognition falls back to a default
//! catalog and inference falls back to synthesized edges, so neither returns
//! an error. Every fallible surface lives at the boundary — configuration
//! loading, document conversion, and report output — and is represented here
//! as a structured variant that preserves context.

use std::io;

use thiserror::Error;

/// Main result type for simap operations.
pub type Result<T> = std::result::Result<T, SimapError>;

/// Error type for all simap boundary operations.
#[derive(Error, Debug)]
pub enum SimapError {
    /// I/O related errors (file operations)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Document conversion errors ("document unreadable")
    #[error("Document error: {message}")]
    Document {
        /// Error description
        message: String,
        /// File name of the offending document
        file_name: Option<String>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
    },
}

impl SimapError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new document conversion error
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
            file_name: None,
        }
    }

    /// Create a new document conversion error with the file name
    pub fn document_in_file(message: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
            file_name: Some(file_name.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error means the input document could not be read at all
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::Document { .. })
    }
}

impl From<io::Error> for SimapError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for SimapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for SimapError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}
