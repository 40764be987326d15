//! Error handling for UniVibe
//!
//! This module defines the main error types used throughout the service
//! and provides a unified error handling strategy. Every validation failure
//! carries a stable machine-readable code; storage-layer error text never
//! reaches the caller.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the UniVibe event service
#[derive(Error, Debug)]
pub enum UniVibeError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: Uuid },

    #[error("Event is not available for joining")]
    EventNotAvailable,

    #[error("Registration deadline has passed")]
    DeadlinePassed,

    #[error("You already joined this event")]
    AlreadyRegistered,

    #[error("You have not joined this event")]
    NotJoined,

    #[error("Event has reached maximum capacity")]
    CapacityExceeded,

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Operation not permitted in current state: {0}")]
    InvalidState(String),

    #[error("Check-in token is invalid or expired")]
    InvalidToken,

    #[error("Check-in token was issued for a different event")]
    TokenMismatch,

    #[error("Check-in token has been superseded by a newer one")]
    TokenSuperseded,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for UniVibe operations
pub type Result<T> = std::result::Result<T, UniVibeError>;

impl UniVibeError {
    /// Check if the error is transient and worth retrying.
    ///
    /// `ServiceUnavailable` (and the database errors that map to it) is the
    /// only retryable category; everything else is terminal for the request
    /// until its precondition changes.
    pub fn is_recoverable(&self) -> bool {
        match self {
            UniVibeError::Database(e) => is_transient_db_error(e),
            UniVibeError::ServiceUnavailable(_) => true,
            UniVibeError::Io(_) => true,
            _ => false,
        }
    }

    /// Stable machine-readable code exposed to API callers.
    pub fn error_code(&self) -> &'static str {
        match self {
            UniVibeError::Database(e) if is_transient_db_error(e) => "SERVICE_UNAVAILABLE",
            UniVibeError::Database(_) | UniVibeError::Migration(_) => "INTERNAL_ERROR",
            UniVibeError::Config(_) => "INTERNAL_ERROR",
            UniVibeError::EventNotFound { .. } => "EVENT_NOT_FOUND",
            UniVibeError::RegistrationNotFound { .. } => "REGISTRATION_NOT_FOUND",
            UniVibeError::EventNotAvailable => "EVENT_NOT_AVAILABLE",
            UniVibeError::DeadlinePassed => "DEADLINE_PASSED",
            UniVibeError::AlreadyRegistered => "ALREADY_JOINED",
            UniVibeError::NotJoined => "NOT_JOINED",
            UniVibeError::CapacityExceeded => "EVENT_FULL",
            UniVibeError::InvalidStateTransition { .. } => "INVALID_STATE",
            UniVibeError::InvalidState(_) => "INVALID_STATE",
            UniVibeError::InvalidToken => "INVALID_TOKEN",
            UniVibeError::TokenMismatch => "TOKEN_MISMATCH",
            UniVibeError::TokenSuperseded => "TOKEN_SUPERSEDED",
            UniVibeError::PermissionDenied(_) => "PERMISSION_DENIED",
            UniVibeError::InvalidInput(_) => "VALIDATION_ERROR",
            UniVibeError::Serialization(_) => "VALIDATION_ERROR",
            UniVibeError::Io(_) => "SERVICE_UNAVAILABLE",
            UniVibeError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            UniVibeError::Database(e) if is_transient_db_error(e) => ErrorSeverity::Warning,
            UniVibeError::Database(_) => ErrorSeverity::Critical,
            UniVibeError::Migration(_) => ErrorSeverity::Critical,
            UniVibeError::Config(_) => ErrorSeverity::Critical,
            UniVibeError::PermissionDenied(_) => ErrorSeverity::Warning,
            UniVibeError::ServiceUnavailable(_) => ErrorSeverity::Warning,
            UniVibeError::Io(_) => ErrorSeverity::Warning,
            UniVibeError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Info,
        }
    }
}

/// Connection-level failures signal the caller to back off and retry;
/// everything else from the database is a hard error.
fn is_transient_db_error(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
    )
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            UniVibeError::EventNotFound { event_id: "x".into() }.error_code(),
            "EVENT_NOT_FOUND"
        );
        assert_eq!(UniVibeError::AlreadyRegistered.error_code(), "ALREADY_JOINED");
        assert_eq!(UniVibeError::CapacityExceeded.error_code(), "EVENT_FULL");
        assert_eq!(UniVibeError::EventNotAvailable.error_code(), "EVENT_NOT_AVAILABLE");
        assert_eq!(UniVibeError::NotJoined.error_code(), "NOT_JOINED");
        assert_eq!(UniVibeError::TokenSuperseded.error_code(), "TOKEN_SUPERSEDED");
    }

    #[test]
    fn test_only_infrastructure_failures_are_recoverable() {
        assert!(UniVibeError::ServiceUnavailable("db down".into()).is_recoverable());
        assert!(UniVibeError::Database(sqlx::Error::PoolTimedOut).is_recoverable());
        assert!(!UniVibeError::CapacityExceeded.is_recoverable());
        assert!(!UniVibeError::AlreadyRegistered.is_recoverable());
        assert!(!UniVibeError::InvalidToken.is_recoverable());
    }
}
