//! HTTP surface
//!
//! Thin axum layer over the services; all business rules live below it.

pub mod error;
pub mod extractors;
pub mod handlers;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::database::DatabasePool;
use crate::services::ServiceFactory;

pub use error::ErrorBody;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub pool: DatabasePool,
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/events", post(handlers::events::create_event))
        .route("/events", get(handlers::events::list_events))
        .route("/events/:id", get(handlers::events::get_event))
        .route("/events/:id", patch(handlers::events::update_event))
        .route("/events/:id", delete(handlers::events::delete_event))
        .route("/events/:id/publish", post(handlers::events::publish_event))
        .route("/events/:id/cancel", post(handlers::events::cancel_event))
        .route("/events/:id/join", post(handlers::registrations::join_event))
        .route("/events/:id/leave", delete(handlers::registrations::leave_event))
        .route("/events/:id/status", get(handlers::registrations::user_event_status))
        .route("/events/:id/favorite", post(handlers::favorites::toggle_favorite))
        .route(
            "/users/favorite-events",
            get(handlers::favorites::list_favorite_events),
        )
        .route(
            "/events/:id/registrations",
            get(handlers::registrations::list_registrations),
        )
        .route("/events/:id/ticket", post(handlers::checkin::issue_ticket))
        .route("/events/:id/checkin", post(handlers::checkin::check_in))
        .route("/admin/status-update", post(handlers::admin::trigger_status_update))
        .route(
            "/admin/status-update/preview",
            get(handlers::admin::preview_status_update),
        )
        .route("/internal/user-events", post(handlers::admin::apply_user_event))
        .route("/health", get(handlers::admin::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
