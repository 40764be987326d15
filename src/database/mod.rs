//! Database layer

pub mod connection;
pub mod repositories;
pub mod service;

pub use connection::{create_pool, health_check, run_migrations, DatabasePool, PoolConfig};
pub use repositories::{EventRepository, FavoriteRepository, RegistrationRepository};
pub use service::DatabaseService;
