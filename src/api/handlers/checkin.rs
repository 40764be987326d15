//! Ticket issuance and check-in handlers

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::extractors::parse_event_id;
use crate::api::AppState;
use crate::models::user::UserContext;
use crate::utils::errors::UniVibeError;

/// `POST /events/{id}/ticket`
pub async fn issue_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let ticket = state
        .services
        .tickets
        .issue_ticket(event_id, ctx.user_id)
        .await?;

    Ok(Json(ticket))
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub token: String,
}

/// `POST /events/{id}/checkin`
pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
    Json(request): Json<CheckInRequest>,
) -> Result<impl IntoResponse, UniVibeError> {
    if !ctx.role.can_manage_events() {
        return Err(UniVibeError::PermissionDenied(
            "Only event staff may perform check-in".to_string(),
        ));
    }

    let event_id = parse_event_id(&id)?;
    let result = state
        .services
        .tickets
        .check_in(event_id, &request.token, &ctx)
        .await?;

    Ok(Json(result))
}
