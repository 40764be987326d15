//! Join/leave and registration listing handlers

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::extractors::parse_event_id;
use crate::api::AppState;
use crate::models::registration::RegistrationStatus;
use crate::models::user::UserContext;
use crate::utils::errors::UniVibeError;

/// `POST /events/{id}/join`
pub async fn join_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let confirmation = state.services.registrations.join(event_id, &ctx).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Joined event successfully",
        "data": confirmation
    })))
}

/// `DELETE /events/{id}/leave`
pub async fn leave_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let confirmation = state
        .services
        .registrations
        .leave(event_id, ctx.user_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Left event successfully",
        "data": confirmation
    })))
}

/// `GET /events/{id}/status`
pub async fn user_event_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let status = state
        .services
        .registrations
        .user_event_status(event_id, ctx.user_id)
        .await?;

    Ok(Json(status))
}

#[derive(Debug, Deserialize)]
pub struct ListRegistrationsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<RegistrationStatus>,
}

/// `GET /events/{id}/registrations`
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
    Query(params): Query<ListRegistrationsParams>,
) -> Result<impl IntoResponse, UniVibeError> {
    if !ctx.role.can_manage_events() {
        return Err(UniVibeError::PermissionDenied(
            "Only club managers and admins may list registrations".to_string(),
        ));
    }

    let event_id = parse_event_id(&id)?;
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(20);

    let (registrations, total) = state
        .services
        .registrations
        .list_registrations(event_id, params.status, page, limit)
        .await?;

    Ok(Json(serde_json::json!({
        "data": registrations,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total
        }
    })))
}
