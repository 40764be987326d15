//! Integration tests for the status sweeper: auto-publish, auto-complete,
//! idempotence, and the dry-run preview.

mod helpers;

use chrono::{Duration, Utc};
use serial_test::serial;

use UniVibe::models::event::EventStatus;

use helpers::test_data::{create_services, event_request, manager_ctx};
use helpers::TestDatabase;

#[tokio::test]
#[serial]
async fn test_sweep_publishes_due_drafts() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let now = Utc::now();
    let mut request = event_request(now - Duration::hours(1), now + Duration::hours(1), None, None);
    request.status = Some(EventStatus::Draft);
    let event = services.events.create(request, &manager_ctx()).await.unwrap();

    let summary = services.sweeper.run_once().await.unwrap();
    assert_eq!(summary.events_published, 1);
    assert_eq!(summary.events_completed, 0);
    assert_eq!(summary.total_updated, 1);

    let event = services.events.get(event.id).await.unwrap();
    assert_eq!(event.status, EventStatus::Published);
}

#[tokio::test]
#[serial]
async fn test_sweep_completes_expired_published() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let now = Utc::now();
    let request = event_request(now - Duration::hours(3), now - Duration::hours(1), None, None);
    let event = services.events.create(request, &manager_ctx()).await.unwrap();

    let summary = services.sweeper.run_once().await.unwrap();
    assert_eq!(summary.events_completed, 1);

    let event = services.events.get(event.id).await.unwrap();
    assert_eq!(event.status, EventStatus::Completed);
}

#[tokio::test]
#[serial]
async fn test_sweep_is_idempotent() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let now = Utc::now();
    let mut draft = event_request(now - Duration::hours(1), now + Duration::hours(1), None, None);
    draft.status = Some(EventStatus::Draft);
    services.events.create(draft, &manager_ctx()).await.unwrap();

    let expired = event_request(now - Duration::hours(3), now - Duration::hours(1), None, None);
    services.events.create(expired, &manager_ctx()).await.unwrap();

    let first = services.sweeper.run_once().await.unwrap();
    assert_eq!(first.total_updated, 2);

    // No intervening state change: the second run matches nothing
    let second = services.sweeper.run_once().await.unwrap();
    assert_eq!(second.total_updated, 0);
}

#[tokio::test]
#[serial]
async fn test_sweep_never_touches_cancelled_events() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let now = Utc::now();
    let request = event_request(now - Duration::hours(3), now - Duration::hours(1), None, None);
    let event = services.events.create(request, &manager_ctx()).await.unwrap();
    services.events.cancel(event.id, &manager_ctx()).await.unwrap();

    let summary = services.sweeper.run_once().await.unwrap();
    assert_eq!(summary.total_updated, 0);

    let event = services.events.get(event.id).await.unwrap();
    assert_eq!(event.status, EventStatus::Cancelled);
}

#[tokio::test]
#[serial]
async fn test_sweep_skips_drafts_that_already_ended() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let now = Utc::now();
    let mut request = event_request(now - Duration::hours(3), now - Duration::hours(1), None, None);
    request.status = Some(EventStatus::Draft);
    let event = services.events.create(request, &manager_ctx()).await.unwrap();

    let summary = services.sweeper.run_once().await.unwrap();
    assert_eq!(summary.total_updated, 0);

    // A draft whose window has closed is neither published nor completed
    let event = services.events.get(event.id).await.unwrap();
    assert_eq!(event.status, EventStatus::Draft);
}

#[tokio::test]
#[serial]
async fn test_preview_reports_without_updating() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let now = Utc::now();
    let mut draft = event_request(now - Duration::hours(1), now + Duration::hours(1), None, None);
    draft.status = Some(EventStatus::Draft);
    let draft_event = services.events.create(draft, &manager_ctx()).await.unwrap();

    let expired = event_request(now - Duration::hours(3), now - Duration::hours(1), None, None);
    services.events.create(expired, &manager_ctx()).await.unwrap();

    let preview = services.sweeper.preview().await.unwrap();
    assert_eq!(preview.draft_ready_to_publish, 1);
    assert_eq!(preview.expired_published, 1);
    assert_eq!(preview.details.draft_ready_to_publish[0].id, draft_event.id);

    // Dry run: nothing changed
    let event = services.events.get(draft_event.id).await.unwrap();
    assert_eq!(event.status, EventStatus::Draft);
}
