//! HTTP mapping for service errors
//!
//! Every failure category maps to one stable machine-readable code plus a
//! human-readable message. Internal error text (storage layer, signing
//! library) never reaches the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::errors::UniVibeError;

/// Error response body shape shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

impl UniVibeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UniVibeError::EventNotFound { .. } | UniVibeError::RegistrationNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            UniVibeError::EventNotAvailable
            | UniVibeError::DeadlinePassed
            | UniVibeError::AlreadyRegistered
            | UniVibeError::NotJoined
            | UniVibeError::CapacityExceeded
            | UniVibeError::InvalidState(_)
            | UniVibeError::InvalidStateTransition { .. }
            | UniVibeError::InvalidToken
            | UniVibeError::TokenMismatch
            | UniVibeError::InvalidInput(_)
            | UniVibeError::Serialization(_) => StatusCode::BAD_REQUEST,
            UniVibeError::TokenSuperseded => StatusCode::CONFLICT,
            UniVibeError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            _ if self.is_recoverable() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "An internal error occurred".to_string(),
            StatusCode::SERVICE_UNAVAILABLE => {
                "Service temporarily unavailable. Please try again later.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for UniVibeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "Request rejected");
        }

        let body = ErrorBody {
            status: status.as_u16(),
            error: self.error_code(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
