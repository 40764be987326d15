//! Favorite repository implementation

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::Event;
use crate::models::favorite::EventFavorite;
use crate::utils::errors::UniVibeError;

const FAVORITE_COLUMNS: &str = "id, event_id, user_id, notifications_enabled, marked_at";

#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark an event as favorite. Returns `None` when the mark already
    /// exists; the conflict clause makes a concurrent double-toggle land on
    /// one row.
    pub async fn insert(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<EventFavorite>, UniVibeError> {
        let favorite = sqlx::query_as::<_, EventFavorite>(&format!(
            r#"
            INSERT INTO event_favorites (event_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (event_id, user_id) DO NOTHING
            RETURNING {FAVORITE_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favorite)
    }

    /// Remove a favorite mark. Returns whether a row was removed.
    pub async fn delete(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, UniVibeError> {
        let result = sqlx::query(
            "DELETE FROM event_favorites WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, UniVibeError> {
        let found: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM event_favorites WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    /// The user's favorite events, most recently marked first.
    pub async fn list_events_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, UniVibeError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT e.id, e.title, e.description, e.category, e.fee, e.currency, \
                    e.max_participants, e.status, e.visibility, e.start_date, e.end_date, \
                    e.registration_deadline, e.club_id, e.created_by, e.created_at, e.updated_at \
             FROM event_favorites f \
             JOIN events e ON e.id = f.event_id \
             WHERE f.user_id = $1 \
             ORDER BY f.marked_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64, UniVibeError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM event_favorites WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
