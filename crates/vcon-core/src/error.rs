//! Error types for vCon construction, parsing and signing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole vCon core.
///
/// Every fallible operation in this crate returns this type. Variants carry
/// plain strings so the error stays `Clone` and serializable.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VConError {
    /// A required field is missing or has the wrong shape
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Dialog content mimetype outside the allowed set
    #[error("Invalid MIME type: {0}")]
    InvalidMimeType(String),

    /// Malformed or structurally incompatible JSON document
    #[error("Failed to parse vCon JSON: {message}")]
    Parse { message: String },

    /// Key parsing or signature computation failed
    #[error("Failed to sign vCon: {0}")]
    Signing(String),

    /// Signature did not verify (only surfaced by `verify_strict`)
    #[error("Verification failed: {0}")]
    Verification(String),

    /// Key generation or PEM encoding failed
    #[error("Key error: {0}")]
    Key(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config file access)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl VConError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the given field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Validation error for a missing required field
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("'{}' is required", field);
        Self::Validation { field, message }
    }

    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a Signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing(message.into())
    }

    /// Creates a Verification error
    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification(message.into())
    }

    /// Creates a Key error
    pub fn key(message: impl Into<String>) -> Self {
        Self::Key(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_invalid_mime_type(&self) -> bool {
        matches!(self, Self::InvalidMimeType(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub fn is_signing(&self) -> bool {
        matches!(self, Self::Signing(_))
    }

    pub fn is_verification(&self) -> bool {
        matches!(self, Self::Verification(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for VConError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VConError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for VConError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, VConError>`.
pub type Result<T> = std::result::Result<T, VConError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = VConError::missing("vendor");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: vendor - 'vendor' is required");
    }

    #[test]
    fn test_json_error_converts_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: VConError = json_err.into();
        assert!(err.is_parse());
    }

    #[test]
    fn test_io_error_keeps_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: VConError = io_err.into();
        match err {
            VConError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
