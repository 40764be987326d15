//! Integration tests for event favorites: toggle semantics, per-user
//! listing, and cleanup when the event goes away.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;
use uuid::Uuid;

use UniVibe::utils::errors::UniVibeError;

use helpers::test_data::{create_published_event, create_services, manager_ctx, student_ctx};
use helpers::TestDatabase;

#[tokio::test]
#[serial]
async fn test_toggle_flips_favorite_state() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let event = create_published_event(&services, None).await;
    let user = student_ctx();

    let first = services.favorites.toggle(event.id, user.user_id).await.unwrap();
    assert!(first.is_favorited);
    assert!(services
        .favorites
        .is_favorited(event.id, user.user_id)
        .await
        .unwrap());

    let second = services.favorites.toggle(event.id, user.user_id).await.unwrap();
    assert!(!second.is_favorited);
    assert!(!services
        .favorites
        .is_favorited(event.id, user.user_id)
        .await
        .unwrap());

    // Toggling never accumulates rows
    let rows = db.count_records("event_favorites").await.unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
#[serial]
async fn test_toggle_missing_event_not_found() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());

    let err = services
        .favorites
        .toggle(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_matches!(err, UniVibeError::EventNotFound { .. });
}

#[tokio::test]
#[serial]
async fn test_favorite_listing_is_per_user_and_newest_first() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let event_a = create_published_event(&services, None).await;
    let event_b = create_published_event(&services, None).await;
    let user = student_ctx();
    let other = student_ctx();

    services.favorites.toggle(event_a.id, user.user_id).await.unwrap();
    // Distinct marked_at timestamps for a deterministic ordering
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    services.favorites.toggle(event_b.id, user.user_id).await.unwrap();
    services.favorites.toggle(event_a.id, other.user_id).await.unwrap();

    let (events, total) = services
        .favorites
        .list_for_user(user.user_id, 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(events.len(), 2);
    // Most recently marked first
    assert_eq!(events[0].id, event_b.id);
    assert_eq!(events[1].id, event_a.id);

    let (_, other_total) = services
        .favorites
        .list_for_user(other.user_id, 1, 10)
        .await
        .unwrap();
    assert_eq!(other_total, 1);
}

#[tokio::test]
#[serial]
async fn test_favorite_listing_pagination() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let user = student_ctx();

    for _ in 0..3 {
        let event = create_published_event(&services, None).await;
        services.favorites.toggle(event.id, user.user_id).await.unwrap();
    }

    let (page_one, total) = services
        .favorites
        .list_for_user(user.user_id, 1, 2)
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page_one.len(), 2);

    let (page_two, _) = services
        .favorites
        .list_for_user(user.user_id, 2, 2)
        .await
        .unwrap();
    assert_eq!(page_two.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_deleting_event_removes_its_favorites() {
    let db = TestDatabase::new().await.expect("test database");
    let services = create_services(db.pool.clone());
    let event = create_published_event(&services, None).await;
    let user = student_ctx();

    services.favorites.toggle(event.id, user.user_id).await.unwrap();
    services.events.delete(event.id, &manager_ctx()).await.unwrap();

    let rows = db.count_records("event_favorites").await.unwrap();
    assert_eq!(rows, 0);

    let (_, total) = services
        .favorites
        .list_for_user(user.user_id, 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 0);
}
