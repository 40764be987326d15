//! Event model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event lifecycle state.
///
/// The sweeper advances `draft -> published -> completed` based on wall-clock
/// time; `cancelled` is reachable from any non-terminal state via an explicit
/// administrative action. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Cancelled | EventStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Workshop,
    Social,
    Sports,
    Culture,
    Tech,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Workshop => "workshop",
            EventCategory::Social => "social",
            EventCategory::Sports => "sports",
            EventCategory::Culture => "culture",
            EventCategory::Tech => "tech",
            EventCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventVisibility {
    Public,
    ClubMembers,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub fee: Decimal,
    pub currency: String,
    pub max_participants: Option<i32>,
    pub status: EventStatus,
    pub visibility: EventVisibility,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub club_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event accepts new registrations at `now`.
    ///
    /// Joining is allowed while the event is published and the registration
    /// deadline (or the end date, when no deadline is set) has not passed.
    pub fn is_open_for_registration(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Published && !self.deadline_passed(now)
    }

    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        match self.registration_deadline {
            Some(deadline) => now > deadline,
            None => now > self.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    #[serde(default)]
    pub fee: Decimal,
    pub currency: Option<String>,
    pub max_participants: Option<i32>,
    pub status: Option<EventStatus>,
    pub visibility: Option<EventVisibility>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub club_id: Option<Uuid>,
}

/// Partial update. `max_participants` and `registration_deadline` are
/// double-optional so an explicit JSON `null` clears them (back to unlimited
/// capacity / no deadline) while an absent field leaves them untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub fee: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_participants: Option<Option<i32>>,
    pub visibility: Option<EventVisibility>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub registration_deadline: Option<Option<DateTime<Utc>>>,
}

/// Maps a present-but-null field to `Some(None)`; an absent field stays
/// `None` via `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Filter for event listings. All fields are conjunctive; `None` means
/// "no constraint".
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub club_id: Option<Uuid>,
    /// Case-insensitive substring match against title and description.
    pub search: Option<String>,
    pub starts_from: Option<DateTime<Utc>>,
    pub starts_until: Option<DateTime<Utc>>,
    pub ends_after: Option<DateTime<Utc>>,
}

/// Compact projection used by the sweeper preview and listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub status: EventStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
