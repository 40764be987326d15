//! Integration tests for the event catalog: filtered listing and partial
//! updates, including clearing optional fields with an explicit null.

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, SubsecRound, Utc};
use serial_test::serial;

use UniVibe::models::event::{EventCategory, EventFilter, EventStatus, UpdateEventRequest};
use UniVibe::utils::errors::UniVibeError;

use helpers::test_data::{
    create_services, event_request, manager_ctx, student_ctx, upcoming_event_request,
};
use helpers::TestDatabase;

#[tokio::test]
#[serial]
async fn test_listing_filters_by_category_and_status() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let manager = manager_ctx();

    let mut workshop = upcoming_event_request(None);
    workshop.category = EventCategory::Workshop;
    services.events.create(workshop, &manager).await.unwrap();

    let mut tech_draft = upcoming_event_request(None);
    tech_draft.category = EventCategory::Tech;
    tech_draft.status = Some(EventStatus::Draft);
    services.events.create(tech_draft, &manager).await.unwrap();

    let filter = EventFilter {
        category: Some(EventCategory::Workshop),
        ..Default::default()
    };
    let (events, total) = services.events.list(&filter, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(events[0].category, EventCategory::Workshop);

    let filter = EventFilter {
        status: Some(EventStatus::Draft),
        ..Default::default()
    };
    let (events, total) = services.events.list(&filter, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(events[0].status, EventStatus::Draft);
}

#[tokio::test]
#[serial]
async fn test_listing_search_matches_title_and_description() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let manager = manager_ctx();

    let mut salsa = upcoming_event_request(None);
    salsa.title = "Salsa Night".to_string();
    services.events.create(salsa, &manager).await.unwrap();

    let mut chess = upcoming_event_request(None);
    chess.title = "Board Games".to_string();
    chess.description = Some("Weekly chess meetup".to_string());
    services.events.create(chess, &manager).await.unwrap();

    let filter = EventFilter {
        search: Some("salsa".to_string()),
        ..Default::default()
    };
    let (events, total) = services.events.list(&filter, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(events[0].title, "Salsa Night");

    // Search also covers the description
    let filter = EventFilter {
        search: Some("chess".to_string()),
        ..Default::default()
    };
    let (events, _) = services.events.list(&filter, 1, 10).await.unwrap();
    assert_eq!(events[0].title, "Board Games");
}

#[tokio::test]
#[serial]
async fn test_listing_upcoming_excludes_ended_and_draft() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let manager = manager_ctx();
    let now = Utc::now();

    let upcoming = upcoming_event_request(None);
    let upcoming_event = services.events.create(upcoming, &manager).await.unwrap();

    let ended = event_request(now - Duration::hours(3), now - Duration::hours(1), None, None);
    services.events.create(ended, &manager).await.unwrap();

    let mut draft = upcoming_event_request(None);
    draft.status = Some(EventStatus::Draft);
    services.events.create(draft, &manager).await.unwrap();

    let filter = EventFilter {
        status: Some(EventStatus::Published),
        ends_after: Some(now),
        ..Default::default()
    };
    let (events, total) = services.events.list(&filter, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(events[0].id, upcoming_event.id);
}

#[tokio::test]
#[serial]
async fn test_listing_date_range_and_pagination() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let manager = manager_ctx();
    let now = Utc::now();

    for day in 1..=4 {
        let request = event_request(
            now + Duration::days(day),
            now + Duration::days(day) + Duration::hours(2),
            None,
            None,
        );
        services.events.create(request, &manager).await.unwrap();
    }

    let filter = EventFilter {
        starts_from: Some(now + Duration::days(2) - Duration::hours(1)),
        starts_until: Some(now + Duration::days(3) + Duration::hours(1)),
        ..Default::default()
    };
    let (events, total) = services.events.list(&filter, 1, 10).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(events.len(), 2);

    let all = EventFilter::default();
    let (page_one, total) = services.events.list(&all, 1, 3).await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(page_one.len(), 3);

    let (page_two, _) = services.events.list(&all, 2, 3).await.unwrap();
    assert_eq!(page_two.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_update_with_null_clears_deadline_and_capacity() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let manager = manager_ctx();
    let now = Utc::now();

    // Deadline already passed, capacity of one
    let request = event_request(
        now + Duration::hours(1),
        now + Duration::hours(4),
        Some(now - Duration::minutes(5)),
        Some(1),
    );
    let event = services.events.create(request, &manager).await.unwrap();

    let err = services
        .registrations
        .join(event.id, &student_ctx())
        .await
        .unwrap_err();
    assert_matches!(err, UniVibeError::DeadlinePassed);

    let clear = UpdateEventRequest {
        max_participants: Some(None),
        registration_deadline: Some(None),
        ..Default::default()
    };
    let updated = services.events.update(event.id, clear, &manager).await.unwrap();
    assert_eq!(updated.max_participants, None);
    assert_eq!(updated.registration_deadline, None);

    // With the deadline gone and capacity unlimited, joins work again
    services.registrations.join(event.id, &student_ctx()).await.unwrap();
    services.registrations.join(event.id, &student_ctx()).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_update_with_absent_fields_keeps_values() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let manager = manager_ctx();
    let now = Utc::now();

    // Microsecond precision survives the timestamptz round trip
    let deadline = (now + Duration::hours(2)).trunc_subsecs(6);
    let request = event_request(
        now + Duration::hours(3),
        now + Duration::hours(5),
        Some(deadline),
        Some(25),
    );
    let event = services.events.create(request, &manager).await.unwrap();

    let rename = UpdateEventRequest {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = services.events.update(event.id, rename, &manager).await.unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.max_participants, Some(25));
    assert_eq!(updated.registration_deadline, Some(deadline));
}
