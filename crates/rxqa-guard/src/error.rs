//! Guard error types.
//!
//! Every failure carries enough context for a user-facing message and an
//! optional remediation hint.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be moved over the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize session data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize session data")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored data does not match its checksum.
    #[error("Checksum mismatch (expected {expected}, got {actual})")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Access token is not valid base64")]
    TokenEncoding {
        #[source]
        source: base64::DecodeError,
    },

    #[error("Access token is not valid text")]
    TokenNotUtf8,

    #[error("Access token is malformed: {reason}")]
    TokenFormat { reason: &'static str },

    #[error("Unsupported access token version '{found}'")]
    TokenVersion { found: String },

    #[error("Token checksum validation failed (got {actual}, expected {expected})")]
    TokenChecksum { expected: String, actual: String },

    /// A token field is empty or contains the field separator.
    #[error("Access token field '{field}' is missing or invalid")]
    TokenField { field: &'static str },

    #[error("Invalid date or time format: {value}")]
    InvalidStart { value: String },

    #[error("Invalid duration format: {value}")]
    InvalidDuration { value: String },
}

impl GuardError {
    /// Stored data was unreadable or altered, as opposed to an I/O failure.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. } | Self::Deserialization { .. }
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the session to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::Serialization { .. } => {
                "An error occurred while saving the session.".to_string()
            }
            Self::Deserialization { .. } => {
                "The stored session could not be read. The file may be corrupted.".to_string()
            }
            Self::ChecksumMismatch { .. } => {
                "The stored session was modified outside this tool.".to_string()
            }
            Self::TokenEncoding { .. }
            | Self::TokenNotUtf8
            | Self::TokenFormat { .. }
            | Self::TokenField { .. } => "This access link is not valid. Check your link.".to_string(),
            Self::TokenVersion { found } => {
                format!("This access link uses an unsupported format (version {found}).")
            }
            Self::TokenChecksum { .. } => {
                "This access link has been altered. Check your link.".to_string()
            }
            Self::InvalidStart { value } => {
                format!("The access window start '{value}' is not a valid date and time.")
            }
            Self::InvalidDuration { value } => {
                format!("The access window duration '{value}' is invalid (use a format like \"3h\").")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different session file.".into())
            }
            Self::Deserialization { .. } | Self::ChecksumMismatch { .. } => {
                Some("Run `rxqa reset` to start a new session.".into())
            }
            Self::TokenEncoding { .. }
            | Self::TokenNotUtf8
            | Self::TokenFormat { .. }
            | Self::TokenField { .. }
            | Self::TokenVersion { .. }
            | Self::TokenChecksum { .. } => {
                Some("Ask for a new access link.".into())
            }
            Self::InvalidStart { .. } => Some("Use YYYY-MM-DD and HH:MM.".into()),
            Self::InvalidDuration { .. } => Some("Use whole hours followed by 'h'.".into()),
            Self::Serialization { .. } => None,
        }
    }
}

/// Result type alias for guard operations.
pub type Result<T> = std::result::Result<T, GuardError>;
