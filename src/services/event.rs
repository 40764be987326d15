//! Event management service
//!
//! CRUD and lifecycle operations for events. Only club managers and admins
//! may create or mutate events; the role arrives with the authenticated
//! request context and is trusted.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::EventRepository;
use crate::models::event::{CreateEventRequest, Event, EventFilter, EventStatus, UpdateEventRequest};
use crate::models::user::UserContext;
use crate::utils::errors::{Result, UniVibeError};

#[derive(Debug, Clone)]
pub struct EventService {
    events: EventRepository,
}

impl EventService {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    /// Create a new event. Initial status may be `draft` or `published`;
    /// the sweeper and explicit cancellation handle everything after that.
    pub async fn create(&self, request: CreateEventRequest, ctx: &UserContext) -> Result<Event> {
        require_manager(ctx)?;
        validate_dates(
            request.start_date,
            request.end_date,
            request.registration_deadline,
        )?;

        if request.title.trim().is_empty() {
            return Err(UniVibeError::InvalidInput("Title is required".to_string()));
        }

        if let Some(max) = request.max_participants {
            if max <= 0 {
                return Err(UniVibeError::InvalidInput(
                    "max_participants must be positive".to_string(),
                ));
            }
        }

        if let Some(status) = request.status {
            if !matches!(status, EventStatus::Draft | EventStatus::Published) {
                return Err(UniVibeError::InvalidInput(
                    "New events must start as draft or published".to_string(),
                ));
            }
        }

        let event = self.events.create(request, ctx.user_id).await?;
        info!(event_id = %event.id, created_by = %ctx.user_id, "Event created");

        Ok(event)
    }

    /// Get event by ID
    pub async fn get(&self, event_id: Uuid) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })
    }

    /// Filtered, paginated event listing. Returns the page and the total
    /// matching count.
    pub async fn list(
        &self,
        filter: &EventFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Event>, i64)> {
        if !(1..=100).contains(&limit) {
            return Err(UniVibeError::InvalidInput(
                "Limit must be between 1 and 100".to_string(),
            ));
        }
        let page = page.max(1);
        let offset = (page - 1) * limit;

        let events = self.events.search(filter, limit, offset).await?;
        let total = self.events.count_matching(filter).await?;

        Ok((events, total))
    }

    /// Apply a partial update to an event.
    pub async fn update(
        &self,
        event_id: Uuid,
        request: UpdateEventRequest,
        ctx: &UserContext,
    ) -> Result<Event> {
        require_manager(ctx)?;
        let existing = self.get(event_id).await?;

        if existing.status.is_terminal() {
            return Err(UniVibeError::InvalidState(format!(
                "Cannot update an event in '{}' state",
                existing.status
            )));
        }

        // Validate the dates as they would be after the merge. A present
        // deadline (even null) replaces the stored one; an absent field
        // keeps it.
        let start = request.start_date.unwrap_or(existing.start_date);
        let end = request.end_date.unwrap_or(existing.end_date);
        let deadline = match request.registration_deadline {
            Some(deadline) => deadline,
            None => existing.registration_deadline,
        };
        validate_dates(start, end, deadline)?;

        if let Some(Some(max)) = request.max_participants {
            if max <= 0 {
                return Err(UniVibeError::InvalidInput(
                    "max_participants must be positive".to_string(),
                ));
            }
        }

        let event = self.events.update(event_id, request).await?;
        debug!(event_id = %event_id, updated_by = %ctx.user_id, "Event updated");

        Ok(event)
    }

    /// Publish a draft event ahead of its scheduled window.
    pub async fn publish(&self, event_id: Uuid, ctx: &UserContext) -> Result<Event> {
        require_manager(ctx)?;
        let existing = self.get(event_id).await?;

        if existing.status != EventStatus::Draft {
            return Err(UniVibeError::InvalidStateTransition {
                from: existing.status.to_string(),
                to: EventStatus::Published.to_string(),
            });
        }

        let event = self.events.set_status(event_id, EventStatus::Published).await?;
        info!(event_id = %event_id, admin_id = %ctx.user_id, "Event published");

        Ok(event)
    }

    /// Cancel an event. Allowed from any non-terminal state; the sweeper
    /// never resurrects a cancelled event.
    pub async fn cancel(&self, event_id: Uuid, ctx: &UserContext) -> Result<Event> {
        require_manager(ctx)?;
        let existing = self.get(event_id).await?;

        if existing.status.is_terminal() {
            return Err(UniVibeError::InvalidStateTransition {
                from: existing.status.to_string(),
                to: EventStatus::Cancelled.to_string(),
            });
        }

        let event = self.events.set_status(event_id, EventStatus::Cancelled).await?;
        crate::utils::logging::log_admin_action(ctx.user_id, "cancel_event", Some(&event_id.to_string()));

        Ok(event)
    }

    /// Delete an event. Registrations are removed by the FK cascade.
    pub async fn delete(&self, event_id: Uuid, ctx: &UserContext) -> Result<()> {
        require_manager(ctx)?;

        if !self.events.delete(event_id).await? {
            return Err(UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            });
        }

        crate::utils::logging::log_admin_action(ctx.user_id, "delete_event", Some(&event_id.to_string()));
        Ok(())
    }
}

fn require_manager(ctx: &UserContext) -> Result<()> {
    if !ctx.role.can_manage_events() {
        return Err(UniVibeError::PermissionDenied(
            "Only club managers and admins may manage events".to_string(),
        ));
    }
    Ok(())
}

fn validate_dates(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    deadline: Option<DateTime<Utc>>,
) -> Result<()> {
    if end < start {
        return Err(UniVibeError::InvalidInput(
            "end_date must not be before start_date".to_string(),
        ));
    }

    if let Some(deadline) = deadline {
        if deadline > end {
            return Err(UniVibeError::InvalidInput(
                "registration_deadline must not be after end_date".to_string(),
            ));
        }
    }

    Ok(())
}
