//! Service layer
//!
//! Business rules live here; the repositories below only move rows.

pub mod event;
pub mod favorite;
pub mod registration;
pub mod sweeper;
pub mod ticket;
pub mod user_sync;

use std::sync::Arc;

pub use event::EventService;
pub use favorite::FavoriteService;
pub use registration::RegistrationService;
pub use sweeper::{StatusSweeper, SweepPreview, SweepSummary};
pub use ticket::{CheckInClaims, CheckInResult, IssuedTicket, TicketService};
pub use user_sync::UserSyncService;

use crate::config::Settings;
use crate::database::DatabaseService;

/// Bundles all services, constructed once at startup and handed to the API
/// layer. Replaces the module-level singletons of earlier iterations with an
/// explicitly constructed context object.
#[derive(Clone)]
pub struct ServiceFactory {
    pub events: EventService,
    pub registrations: RegistrationService,
    pub favorites: FavoriteService,
    pub tickets: TicketService,
    pub sweeper: Arc<StatusSweeper>,
    pub user_sync: UserSyncService,
}

impl ServiceFactory {
    pub fn new(db: &DatabaseService, settings: &Settings) -> Self {
        Self {
            events: EventService::new(db.events.clone()),
            registrations: RegistrationService::new(
                db.pool.clone(),
                db.events.clone(),
                db.registrations.clone(),
            ),
            favorites: FavoriteService::new(db.events.clone(), db.favorites.clone()),
            tickets: TicketService::new(
                db.events.clone(),
                db.registrations.clone(),
                &settings.tickets,
            ),
            sweeper: Arc::new(StatusSweeper::new(db.events.clone(), &settings.sweeper)),
            user_sync: UserSyncService::new(db.registrations.clone()),
        }
    }
}
