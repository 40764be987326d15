//! Request extractors
//!
//! The API gateway authenticates every request upstream and forwards the
//! identity as `x-user-*` headers. The extractor trusts those headers; it
//! only checks that they are present and well-formed.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::models::user::{UserContext, UserRole};
use crate::utils::errors::UniVibeError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_EMAIL_HEADER: &str = "x-user-email";
const USER_NAME_HEADER: &str = "x-user-name";
const USER_ROLE_HEADER: &str = "x-user-role";

#[async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = UniVibeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = header_value(parts, USER_ID_HEADER).ok_or_else(|| {
            UniVibeError::PermissionDenied("Missing authenticated user context".to_string())
        })?;

        let user_id = Uuid::parse_str(&raw_id).map_err(|_| {
            UniVibeError::PermissionDenied("Malformed user id in request context".to_string())
        })?;

        let role = match header_value(parts, USER_ROLE_HEADER).as_deref() {
            Some("admin") => UserRole::Admin,
            Some("club_manager") => UserRole::ClubManager,
            _ => UserRole::Student,
        };

        Ok(UserContext {
            user_id,
            email: header_value(parts, USER_EMAIL_HEADER),
            full_name: header_value(parts, USER_NAME_HEADER),
            role,
        })
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an event id from the path. A malformed id is indistinguishable
/// from a missing event to the caller.
pub fn parse_event_id(raw: &str) -> Result<Uuid, UniVibeError> {
    Uuid::parse_str(raw).map_err(|_| UniVibeError::EventNotFound {
        event_id: raw.to_string(),
    })
}
