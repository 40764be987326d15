//! Registration service implementation
//!
//! Enforces the join/leave business rules: lifecycle state, registration
//! deadline, duplicate prevention and the capacity ceiling. The join path
//! runs inside a single transaction holding a row lock on the event, so two
//! concurrent joins racing for the last free slot are serialized and exactly
//! one of them observes the full event.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{DatabasePool, EventRepository, RegistrationRepository};
use crate::models::event::EventStatus;
use crate::models::registration::{
    JoinConfirmation, LeaveConfirmation, Registration, RegistrationStatus, UserEventStatus,
};
use crate::models::user::UserContext;
use crate::utils::errors::{Result, UniVibeError};

const LEAVE_REASON: &str = "Cancelled by participant";

/// Registration service for joining and leaving events
#[derive(Debug, Clone)]
pub struct RegistrationService {
    pool: DatabasePool,
    events: EventRepository,
    registrations: RegistrationRepository,
}

impl RegistrationService {
    pub fn new(
        pool: DatabasePool,
        events: EventRepository,
        registrations: RegistrationRepository,
    ) -> Self {
        Self {
            pool,
            events,
            registrations,
        }
    }

    /// Register the user for an event.
    ///
    /// Validation order, each a distinct failure mode: event existence,
    /// lifecycle state, registration deadline, duplicate registration,
    /// capacity ceiling. On success the registration row is upserted, so a
    /// user who previously cancelled gets their row reactivated rather than
    /// a second one inserted.
    pub async fn join(&self, event_id: Uuid, ctx: &UserContext) -> Result<JoinConfirmation> {
        debug!(event_id = %event_id, user_id = %ctx.user_id, "Join requested");

        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent joins against this event until commit.
        let event = self
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let now = Utc::now();

        if event.status != EventStatus::Published {
            return Err(UniVibeError::EventNotAvailable);
        }

        if event.deadline_passed(now) {
            return Err(UniVibeError::DeadlinePassed);
        }

        if let Some(existing) = self
            .registrations
            .find_by_pair_in_tx(&mut tx, event_id, ctx.user_id)
            .await?
        {
            if existing.is_active() {
                return Err(UniVibeError::AlreadyRegistered);
            }
        }

        if let Some(ceiling) = event.max_participants {
            let active = self
                .registrations
                .count_active_in_tx(&mut tx, event_id)
                .await?;
            if active >= i64::from(ceiling) {
                return Err(UniVibeError::CapacityExceeded);
            }
        }

        let registration = self
            .registrations
            .upsert_in_tx(
                &mut tx,
                event_id,
                ctx.user_id,
                ctx.email.as_deref(),
                ctx.full_name.as_deref(),
            )
            .await?;

        tx.commit().await?;

        info!(
            event_id = %event_id,
            user_id = %ctx.user_id,
            registration_id = %registration.id,
            "User joined event"
        );

        Ok(JoinConfirmation {
            event_id,
            user_id: ctx.user_id,
            registered_at: registration.registered_at,
            event_title: event.title,
            event_start: event.start_date,
        })
    }

    /// Cancel the user's active registration for an event.
    pub async fn leave(&self, event_id: Uuid, user_id: Uuid) -> Result<LeaveConfirmation> {
        debug!(event_id = %event_id, user_id = %user_id, "Leave requested");

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let registration = self
            .registrations
            .cancel(event_id, user_id, LEAVE_REASON)
            .await?
            .ok_or(UniVibeError::NotJoined)?;

        info!(
            event_id = %event_id,
            user_id = %user_id,
            registration_id = %registration.id,
            "User left event"
        );

        Ok(LeaveConfirmation {
            event_id,
            user_id,
            cancelled_at: registration.cancelled_at.unwrap_or_else(Utc::now),
            event_title: event.title,
            event_start: event.start_date,
        })
    }

    /// Number of registrations currently holding a capacity slot.
    pub async fn active_count(&self, event_id: Uuid) -> Result<i64> {
        self.registrations.count_active(event_id).await
    }

    /// The user's relationship with an event (registered or not, and in
    /// which state).
    pub async fn user_event_status(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<UserEventStatus> {
        let registration = self.registrations.find_by_pair(event_id, user_id).await?;

        let active = registration.as_ref().filter(|r| r.is_active());
        Ok(UserEventStatus {
            event_id,
            user_id,
            is_registered: active.is_some(),
            registration_status: registration.as_ref().map(|r| r.status),
            registered_at: active.map(|r| r.registered_at),
        })
    }

    /// List registrations for an event with pagination. Returns the page
    /// and the total matching count.
    pub async fn list_registrations(
        &self,
        event_id: Uuid,
        status: Option<RegistrationStatus>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Registration>, i64)> {
        if !(1..=100).contains(&limit) {
            return Err(UniVibeError::InvalidInput(
                "Limit must be between 1 and 100".to_string(),
            ));
        }
        let page = page.max(1);

        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let offset = (page - 1) * limit;
        let registrations = self
            .registrations
            .list_for_event(event_id, status, limit, offset)
            .await?;
        let total = self.registrations.count_for_event(event_id, status).await?;

        Ok((registrations, total))
    }
}
