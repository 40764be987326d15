//! Event repository implementation

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::event::{
    CreateEventRequest, Event, EventFilter, EventStatus, EventSummary, UpdateEventRequest,
};
use crate::utils::errors::UniVibeError;

const EVENT_COLUMNS: &str = "id, title, description, category, fee, currency, max_participants, \
     status, visibility, start_date, end_date, registration_deadline, club_id, created_by, \
     created_at, updated_at";

const FILTER_CLAUSES: &str = "($1::text IS NULL OR status = $1) \
     AND ($2::text IS NULL OR category = $2) \
     AND ($3::uuid IS NULL OR club_id = $3) \
     AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%' OR description ILIKE '%' || $4 || '%') \
     AND ($5::timestamptz IS NULL OR start_date >= $5) \
     AND ($6::timestamptz IS NULL OR start_date <= $6) \
     AND ($7::timestamptz IS NULL OR end_date > $7)";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(
        &self,
        request: CreateEventRequest,
        created_by: Uuid,
    ) -> Result<Event, UniVibeError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, description, category, fee, currency, max_participants,
                                status, visibility, start_date, end_date, registration_deadline,
                                club_id, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW())
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.title)
        .bind(request.description)
        .bind(request.category)
        .bind(request.fee)
        .bind(request.currency.unwrap_or_else(|| "USD".to_string()))
        .bind(request.max_participants)
        .bind(request.status.unwrap_or(EventStatus::Draft))
        .bind(request.visibility.unwrap_or(crate::models::EventVisibility::Public))
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.registration_deadline)
        .bind(request.club_id)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, UniVibeError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID with a row lock, serializing concurrent joins
    /// against the same event for the lifetime of the transaction.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Event>, UniVibeError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(event)
    }

    /// Update event. For `max_participants` and `registration_deadline` a
    /// present-but-null value clears the column; the boolean binds tell the
    /// two cases apart.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event, UniVibeError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                fee = COALESCE($5, fee),
                currency = COALESCE($6, currency),
                max_participants = CASE WHEN $7 THEN $8 ELSE max_participants END,
                visibility = COALESCE($9, visibility),
                start_date = COALESCE($10, start_date),
                end_date = COALESCE($11, end_date),
                registration_deadline = CASE WHEN $12 THEN $13 ELSE registration_deadline END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.category)
        .bind(request.fee)
        .bind(request.currency)
        .bind(request.max_participants.is_some())
        .bind(request.max_participants.flatten())
        .bind(request.visibility)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.registration_deadline.is_some())
        .bind(request.registration_deadline.flatten())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Set event status without further checks. State-machine validation
    /// belongs to the service layer.
    pub async fn set_status(&self, id: Uuid, status: EventStatus) -> Result<Event, UniVibeError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event. Registrations are removed by the FK cascade.
    pub async fn delete(&self, id: Uuid) -> Result<bool, UniVibeError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Filtered event listing. Every filter field is optional and the
    /// clauses are conjunctive; a NULL bind disables its clause.
    pub async fn search(
        &self,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, UniVibeError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE {FILTER_CLAUSES} \
             ORDER BY start_date ASC LIMIT $8 OFFSET $9"
        ))
        .bind(filter.status.map(|s| s.as_str().to_string()))
        .bind(filter.category.map(|c| c.as_str().to_string()))
        .bind(filter.club_id)
        .bind(filter.search.as_deref())
        .bind(filter.starts_from)
        .bind(filter.starts_until)
        .bind(filter.ends_after)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count of events matching a filter, for pagination.
    pub async fn count_matching(&self, filter: &EventFilter) -> Result<i64, UniVibeError> {
        let count: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM events WHERE {FILTER_CLAUSES}"
        ))
        .bind(filter.status.map(|s| s.as_str().to_string()))
        .bind(filter.category.map(|c| c.as_str().to_string()))
        .bind(filter.club_id)
        .bind(filter.search.as_deref())
        .bind(filter.starts_from)
        .bind(filter.starts_until)
        .bind(filter.ends_after)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Bulk-complete published events whose end date has passed.
    /// Idempotent: a second run with no state change matches zero rows.
    pub async fn complete_expired(&self, now: DateTime<Utc>) -> Result<u64, UniVibeError> {
        let result = sqlx::query(
            "UPDATE events SET status = 'completed', updated_at = NOW() \
             WHERE status = 'published' AND end_date < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Bulk-publish draft events whose start date has been reached and
    /// whose end date has not yet passed.
    pub async fn publish_due(&self, now: DateTime<Utc>) -> Result<u64, UniVibeError> {
        let result = sqlx::query(
            "UPDATE events SET status = 'published', updated_at = NOW() \
             WHERE status = 'draft' AND start_date <= $1 AND end_date > $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Published events that the next sweep would complete.
    pub async fn find_expired_published(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, UniVibeError> {
        let events = sqlx::query_as::<_, EventSummary>(
            "SELECT id, title, status, start_date, end_date FROM events \
             WHERE status = 'published' AND end_date < $1 \
             ORDER BY end_date DESC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Draft events that the next sweep would publish.
    pub async fn find_draft_ready(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, UniVibeError> {
        let events = sqlx::query_as::<_, EventSummary>(
            "SELECT id, title, status, start_date, end_date FROM events \
             WHERE status = 'draft' AND start_date <= $1 AND end_date > $1 \
             ORDER BY start_date ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
