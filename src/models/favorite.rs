//! Favorite (interest) marks on events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventFavorite {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub notifications_enabled: bool,
    pub marked_at: DateTime<Utc>,
}

/// Outcome of a favorite toggle: the new state after flipping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggle {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub is_favorited: bool,
}
