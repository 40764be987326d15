//! Favorite toggle and listing handlers

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::extractors::parse_event_id;
use crate::api::AppState;
use crate::models::user::UserContext;
use crate::utils::errors::UniVibeError;

/// `POST /events/{id}/favorite`
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: UserContext,
) -> Result<impl IntoResponse, UniVibeError> {
    let event_id = parse_event_id(&id)?;
    let toggle = state
        .services
        .favorites
        .toggle(event_id, ctx.user_id)
        .await?;

    let message = if toggle.is_favorited {
        "Event added to favorites"
    } else {
        "Event removed from favorites"
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": message,
        "data": toggle
    })))
}

#[derive(Debug, Deserialize)]
pub struct ListFavoritesParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /users/favorite-events`
pub async fn list_favorite_events(
    State(state): State<AppState>,
    ctx: UserContext,
    Query(params): Query<ListFavoritesParams>,
) -> Result<impl IntoResponse, UniVibeError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    let (events, total) = state
        .services
        .favorites
        .list_for_user(ctx.user_id, page, limit)
        .await?;

    Ok(Json(serde_json::json!({
        "data": events,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total
        }
    })))
}
