//! Event favorites
//!
//! Users mark events they are interested in without registering. The mark is
//! a toggle: the first call adds it, the next removes it. Favorites are
//! per-user and independent of registrations; deleting an event removes its
//! marks through the FK cascade.

use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{EventRepository, FavoriteRepository};
use crate::models::event::Event;
use crate::models::favorite::FavoriteToggle;
use crate::utils::errors::{Result, UniVibeError};

#[derive(Debug, Clone)]
pub struct FavoriteService {
    events: EventRepository,
    favorites: FavoriteRepository,
}

impl FavoriteService {
    pub fn new(events: EventRepository, favorites: FavoriteRepository) -> Self {
        Self { events, favorites }
    }

    /// Flip the favorite mark for (event, user) and report the new state.
    pub async fn toggle(&self, event_id: Uuid, user_id: Uuid) -> Result<FavoriteToggle> {
        debug!(event_id = %event_id, user_id = %user_id, "Favorite toggle requested");

        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        // Insert-or-nothing, then delete on conflict: whichever side of the
        // toggle applies, exactly one of the two statements changes a row.
        let is_favorited = match self.favorites.insert(event_id, user_id).await? {
            Some(_) => true,
            None => {
                self.favorites.delete(event_id, user_id).await?;
                false
            }
        };

        info!(
            event_id = %event_id,
            user_id = %user_id,
            is_favorited = is_favorited,
            "Favorite toggled"
        );

        Ok(FavoriteToggle {
            event_id,
            user_id,
            is_favorited,
        })
    }

    pub async fn is_favorited(&self, event_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.favorites.exists(event_id, user_id).await
    }

    /// The user's favorite events, newest mark first, with pagination.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
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

        let events = self
            .favorites
            .list_events_for_user(user_id, limit, offset)
            .await?;
        let total = self.favorites.count_for_user(user_id).await?;

        Ok((events, total))
    }
}
