//! Registration model
//!
//! One row per (event, user) pair. Re-joining after a cancellation
//! reactivates the existing row instead of inserting a second one, so the
//! unique constraint on the pair holds for the lifetime of the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Attended,
    Cancelled,
}

impl RegistrationStatus {
    /// A registration counts against the event capacity while active.
    pub fn is_active(&self) -> bool {
        matches!(self, RegistrationStatus::Registered | RegistrationStatus::Attended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Attended => "attended",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub last_jti: Option<String>,
    pub last_token_exp: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_in_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Returned to the caller after a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinConfirmation {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub registered_at: DateTime<Utc>,
    pub event_title: String,
    pub event_start: DateTime<Utc>,
}

/// Returned to the caller after a successful leave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveConfirmation {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub cancelled_at: DateTime<Utc>,
    pub event_title: String,
    pub event_start: DateTime<Utc>,
}

/// A user's relationship with a single event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEventStatus {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub is_registered: bool,
    pub registration_status: Option<RegistrationStatus>,
    pub registered_at: Option<DateTime<Utc>>,
}
