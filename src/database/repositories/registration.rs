//! Registration repository implementation
//!
//! All mutations are single-statement atomic operations. The join path
//! additionally runs inside a transaction owned by the registration service,
//! which holds a row lock on the event while the capacity check and the
//! upsert execute.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::registration::{Registration, RegistrationStatus};
use crate::utils::errors::UniVibeError;

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, user_email, user_name, status, \
     registered_at, cancelled_at, cancellation_reason, last_jti, last_token_exp, \
     checked_in_at, checked_in_by, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the registration for an (event, user) pair. At most one row
    /// exists per pair regardless of how often the user joined and left.
    pub async fn find_by_pair(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations \
             WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Transaction-scoped variant of [`find_by_pair`](Self::find_by_pair).
    pub async fn find_by_pair_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations \
             WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(registration)
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Count registrations holding a capacity slot for an event.
    pub async fn count_active(&self, event_id: Uuid) -> Result<i64, UniVibeError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_registrations \
             WHERE event_id = $1 AND status IN ('registered', 'attended')",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Transaction-scoped variant of [`count_active`](Self::count_active).
    pub async fn count_active_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
    ) -> Result<i64, UniVibeError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_registrations \
             WHERE event_id = $1 AND status IN ('registered', 'attended')",
        )
        .bind(event_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }

    /// Atomic upsert keyed on (event_id, user_id).
    ///
    /// A fresh join inserts; a re-join after cancellation reactivates the
    /// existing row, clearing the cancellation and check-in fields. The
    /// conflict clause subsumes the duplicate-key race between a duplicate
    /// pre-check and the insert: both concurrent joins land on the same row.
    pub async fn upsert_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
        user_email: Option<&str>,
        user_name: Option<&str>,
    ) -> Result<Registration, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO event_registrations
                (event_id, user_id, user_email, user_name, status, registered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'registered', NOW(), NOW(), NOW())
            ON CONFLICT (event_id, user_id) DO UPDATE
            SET status = 'registered',
                user_email = EXCLUDED.user_email,
                user_name = EXCLUDED.user_name,
                registered_at = NOW(),
                cancelled_at = NULL,
                cancellation_reason = NULL,
                last_jti = NULL,
                last_token_exp = NULL,
                checked_in_at = NULL,
                checked_in_by = NULL,
                updated_at = NOW()
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(user_id)
        .bind(user_email)
        .bind(user_name)
        .fetch_one(&mut **tx)
        .await?;

        Ok(registration)
    }

    /// Cancel an active registration. Returns `None` when no active
    /// registration exists for the pair.
    pub async fn cancel(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        reason: &str,
    ) -> Result<Option<Registration>, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE event_registrations
            SET status = 'cancelled',
                cancelled_at = NOW(),
                cancellation_reason = $3,
                updated_at = NOW()
            WHERE event_id = $1 AND user_id = $2 AND status IN ('registered', 'attended')
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(user_id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Store the anti-replay marker for a freshly issued check-in token,
    /// superseding any previously issued token for this registration.
    /// Returns `None` when the registration is no longer in `registered`.
    pub async fn set_ticket_marker(
        &self,
        registration_id: Uuid,
        jti: &str,
        token_exp: DateTime<Utc>,
    ) -> Result<Option<Registration>, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE event_registrations
            SET last_jti = $2, last_token_exp = $3, updated_at = NOW()
            WHERE id = $1 AND status = 'registered'
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration_id)
        .bind(jti)
        .bind(token_exp)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Transition a registration to `attended`, conditioned on the stored
    /// anti-replay marker and the current status. The condition makes the
    /// check-in single-use even under concurrent attempts with the same
    /// token: only the first matching update wins.
    pub async fn mark_attended(
        &self,
        registration_id: Uuid,
        jti: &str,
        checked_in_by: Uuid,
    ) -> Result<Option<Registration>, UniVibeError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE event_registrations
            SET status = 'attended',
                checked_in_at = NOW(),
                checked_in_by = $3,
                updated_at = NOW()
            WHERE id = $1 AND last_jti = $2 AND status = 'registered'
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration_id)
        .bind(jti)
        .bind(checked_in_by)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// List registrations for an event with pagination and an optional
    /// status filter.
    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        status: Option<RegistrationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Registration>, UniVibeError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations \
             WHERE event_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY registered_at ASC LIMIT $3 OFFSET $4"
        ))
        .bind(event_id)
        .bind(status.map(|s| s.as_str().to_string()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Count registrations for an event with an optional status filter.
    pub async fn count_for_event(
        &self,
        event_id: Uuid,
        status: Option<RegistrationStatus>,
    ) -> Result<i64, UniVibeError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_registrations \
             WHERE event_id = $1 AND ($2::text IS NULL OR status = $2)",
        )
        .bind(event_id)
        .bind(status.map(|s| s.as_str().to_string()))
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Propagate updated identity fields onto all registrations of a user.
    pub async fn sync_user_fields(
        &self,
        user_id: Uuid,
        user_email: Option<&str>,
        user_name: Option<&str>,
    ) -> Result<u64, UniVibeError> {
        let result = sqlx::query(
            "UPDATE event_registrations \
             SET user_email = COALESCE($2, user_email), \
                 user_name = COALESCE($3, user_name), \
                 updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(user_email)
        .bind(user_name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Cancel all active registrations of a user (account deletion path).
    pub async fn cancel_all_active_for_user(
        &self,
        user_id: Uuid,
        reason: &str,
    ) -> Result<u64, UniVibeError> {
        let result = sqlx::query(
            "UPDATE event_registrations \
             SET status = 'cancelled', cancelled_at = NOW(), cancellation_reason = $2, updated_at = NOW() \
             WHERE user_id = $1 AND status IN ('registered', 'attended')",
        )
        .bind(user_id)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
