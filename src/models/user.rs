//! Authenticated user context
//!
//! The API gateway authenticates requests upstream and forwards the identity
//! as headers. This service trusts that context without re-validating
//! credentials.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    ClubManager,
    Admin,
}

impl UserRole {
    pub fn can_manage_events(&self) -> bool {
        matches!(self, UserRole::ClubManager | UserRole::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: UserRole,
}

/// Identity-service notifications consumed by the user sync hook.
///
/// On `user.updated` the denormalized email/name on all registrations of the
/// user are refreshed; on `user.deleted` all active registrations are
/// cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    #[serde(rename = "user.updated")]
    Updated {
        user_id: Uuid,
        email: Option<String>,
        full_name: Option<String>,
    },
    #[serde(rename = "user.deleted")]
    Deleted { user_id: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::ClubManager.can_manage_events());
        assert!(UserRole::Admin.can_manage_events());
        assert!(!UserRole::Student.can_manage_events());
    }

    #[test]
    fn test_user_event_deserialization() {
        let json = r#"{"type":"user.updated","user_id":"6f1c1a5e-33aa-4c2b-9f57-6f36f4a1b111","email":"new@uni.edu","full_name":"New Name"}"#;
        let event: UserEvent = serde_json::from_str(json).unwrap();
        match event {
            UserEvent::Updated { email, .. } => assert_eq!(email.as_deref(), Some("new@uni.edu")),
            _ => panic!("expected user.updated"),
        }
    }
}
