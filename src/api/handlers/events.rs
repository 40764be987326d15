//! Event CRUD and lifecycle handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use chrono::{DateTime, Utc};

use crate::api::extractors::parse_event_id;
use crate::api::AppState;
use crate::models::event::{
    CreateEventRequest, EventCategory, EventFilter, EventStatus, UpdateEventRequest,
};
use crate::models::user::UserContext;
use crate::utils::errors::UniVibeError;

#[derive(Debug, Deserialize)]
pub struct ListEventsParams {
    /// `upcoming` restricts to published events that have not ended yet.
    pub filter: Option<String>,
    pub club_id: Option<Uuid>,
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub search: Option<String>,
    pub start_from: Option<DateTime<Utc>>,
    pub start_to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `POST /events`
pub async fn create_event(
    State(state): State<AppState>,
    ctx: UserContext,
    Json(request): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, UniVibeError> {
    let event = state.services.events.create(request, &ctx).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events`
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<impl IntoResponse, UniVibeError> {
    let mut filter = EventFilter {
        status: params.status,
        category: params.category,
        club_id: params.club_id,
        search: params.search,
        starts_from: params.start_from,
        starts_until: params.start_to,
        ends_after: None,
    };

    if params.filter.as_deref() == Some("upcoming") {
        filter.status = Some(EventStatus::Published);
        filter.ends_after = Some(Utc::now());
    }

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);
    let (events, total) = state.services.events.list(&filter, page, limit).await?;

    Ok(Json(serde_json::json!({
        "data": events,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total
        }
    })))
}

/// `GET /events/{id}`
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let event = state.services.events.get(event_id).await?;
    let active = state.services.registrations.active_count(event_id).await?;

    let spots_available = event
        .max_participants
        .map(|max| (i64::from(max) - active).max(0));
    let open = event.is_open_for_registration(chrono::Utc::now())
        && spots_available.map_or(true, |spots| spots > 0);

    Ok(Json(serde_json::json!({
        "event": event,
        "active_registrations": active,
        "spots_available": spots_available,
        "open_for_registration": open
    })))
}

/// `PATCH /events/{id}`
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
    Json(request): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let event = state.services.events.update(event_id, request, &ctx).await?;
    Ok(Json(event))
}

/// `POST /events/{id}/publish`
pub async fn publish_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let event = state.services.events.publish(event_id, &ctx).await?;
    Ok(Json(event))
}

/// `POST /events/{id}/cancel`
pub async fn cancel_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let event = state.services.events.cancel(event_id, &ctx).await?;
    Ok(Json(event))
}

/// `DELETE /events/{id}`
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    state.services.events.delete(event_id, &ctx).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Event deleted successfully"
    })))
}
