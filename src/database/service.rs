//! Database service layer
//!
//! Bundles the repositories behind a single constructor so the startup path
//! builds one explicit context object instead of process-wide singletons.

use crate::database::{DatabasePool, EventRepository, FavoriteRepository, RegistrationRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub pool: DatabasePool,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub favorites: FavoriteRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            favorites: FavoriteRepository::new(pool.clone()),
            pool,
        }
    }
}
