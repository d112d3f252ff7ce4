//! Error types for the Shopdeck application.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Shopdeck application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Remote failures are grouped
/// by the operation that failed (load, save, delete) rather than by transport
/// detail; the message carries whatever the remote side reported.
#[derive(Error, Debug, Clone, Serialize)]
pub enum ShopdeckError {
    /// Fetching the collection or a single record failed
    #[error("failed to load catalog data: {0}")]
    Load(String),

    /// A create or update against the remote service failed
    #[error("failed to save changes: {0}")]
    Save(String),

    /// A delete against the remote service failed
    #[error("failed to delete record: {0}")]
    Delete(String),

    /// The action slot already has a request in flight
    #[error("a {action} request is already in flight")]
    Busy { action: String },

    /// A draft failed its required-field checks
    #[error("validation failed: {0}")]
    Validation(String),

    /// IO error (config file access)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShopdeckError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Load error
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load(message.into())
    }

    /// Creates a Save error
    pub fn save(message: impl Into<String>) -> Self {
        Self::Save(message.into())
    }

    /// Creates a Delete error
    pub fn delete(message: impl Into<String>) -> Self {
        Self::Delete(message.into())
    }

    /// Creates a Busy error for the named action slot
    pub fn busy(action: impl Into<String>) -> Self {
        Self::Busy {
            action: action.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Load error
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Check if this is a Save error
    pub fn is_save(&self) -> bool {
        matches!(self, Self::Save(_))
    }

    /// Check if this is a Delete error
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    /// Check if this is a Busy rejection
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShopdeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShopdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShopdeckError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for ShopdeckError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, ShopdeckError>`.
pub type Result<T> = std::result::Result<T, ShopdeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_helpers() {
        assert!(ShopdeckError::load("timeout").is_load());
        assert!(ShopdeckError::save("rejected").is_save());
        assert!(ShopdeckError::delete("gone").is_delete());
        assert!(ShopdeckError::busy("save").is_busy());
        assert!(ShopdeckError::validation("title is required").is_validation());
    }

    #[test]
    fn test_display_carries_message() {
        let err = ShopdeckError::load("connection refused");
        assert_eq!(
            err.to_string(),
            "failed to load catalog data: connection refused"
        );
    }

    #[test]
    fn test_busy_names_the_action() {
        let err = ShopdeckError::busy("delete");
        assert_eq!(err.to_string(), "a delete request is already in flight");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ShopdeckError = json_err.into();
        assert!(matches!(err, ShopdeckError::Serialization { .. }));
    }
}
