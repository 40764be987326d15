//! Test data helpers for creating events, user contexts and services

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use UniVibe::config::Settings;
use UniVibe::database::DatabaseService;
use UniVibe::models::event::{CreateEventRequest, Event, EventCategory, EventStatus, EventVisibility};
use UniVibe::models::user::{UserContext, UserRole};
use UniVibe::services::ServiceFactory;

pub const TEST_TICKET_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Build a service factory wired to the test database
pub fn create_services(pool: PgPool) -> ServiceFactory {
    let mut settings = Settings::default();
    settings.tickets.secret = TEST_TICKET_SECRET.to_string();

    let db = DatabaseService::new(pool);
    ServiceFactory::new(&db, &settings)
}

/// Authenticated student context
pub fn student_ctx() -> UserContext {
    let user_id = Uuid::new_v4();
    UserContext {
        user_id,
        email: Some(format!("student-{}@uni.edu", &user_id.to_string()[..8])),
        full_name: Some("Test Student".to_string()),
        role: UserRole::Student,
    }
}

/// Authenticated club manager context
pub fn manager_ctx() -> UserContext {
    UserContext {
        user_id: Uuid::new_v4(),
        email: Some("manager@uni.edu".to_string()),
        full_name: Some("Test Manager".to_string()),
        role: UserRole::ClubManager,
    }
}

/// Request for an event starting in one hour and running for three
pub fn upcoming_event_request(max_participants: Option<i32>) -> CreateEventRequest {
    let now = Utc::now();
    event_request(
        now + Duration::hours(1),
        now + Duration::hours(4),
        None,
        max_participants,
    )
}

pub fn event_request(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    registration_deadline: Option<DateTime<Utc>>,
    max_participants: Option<i32>,
) -> CreateEventRequest {
    CreateEventRequest {
        title: "Test Event".to_string(),
        description: Some("An integration test event".to_string()),
        category: EventCategory::Social,
        fee: Decimal::ZERO,
        currency: None,
        max_participants,
        status: Some(EventStatus::Published),
        visibility: Some(EventVisibility::Public),
        start_date,
        end_date,
        registration_deadline,
        club_id: None,
    }
}

/// Create a published event open for registration
pub async fn create_published_event(
    services: &ServiceFactory,
    max_participants: Option<i32>,
) -> Event {
    services
        .events
        .create(upcoming_event_request(max_participants), &manager_ctx())
        .await
        .expect("Failed to create test event")
}
