//! Admin and internal handlers: manual sweep trigger, sweep preview,
//! user sync hook, health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::AppState;
use crate::database::connection::health_check;
use crate::models::user::{UserContext, UserEvent, UserRole};
use crate::utils::errors::UniVibeError;

/// `POST /admin/status-update` — run one sweep synchronously.
pub async fn trigger_status_update(
    State(state): State<AppState>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    require_admin(&ctx)?;

    crate::utils::logging::log_admin_action(ctx.user_id, "trigger_status_update", None);
    let summary = state.services.sweeper.run_once().await?;

    Ok(Json(summary))
}

/// `GET /admin/status-update/preview` — dry run, no writes.
pub async fn preview_status_update(
    State(state): State<AppState>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    require_admin(&ctx)?;

    let preview = state.services.sweeper.preview().await?;
    Ok(Json(preview))
}

/// `POST /internal/user-events` — identity-service notification hook.
pub async fn apply_user_event(
    State(state): State<AppState>,
    Json(event): Json<UserEvent>,
) -> Result<impl IntoResponse, UniVibeError> {
    let affected = state.services.user_sync.apply(event).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "registrations_affected": affected
    })))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "healthy" })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "unhealthy" })),
        ),
    }
}

fn require_admin(ctx: &UserContext) -> Result<(), UniVibeError> {
    if ctx.role != UserRole::Admin {
        return Err(UniVibeError::PermissionDenied(
            "Admin access required".to_string(),
        ));
    }
    Ok(())
}
