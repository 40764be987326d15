//! UniVibe Event Service
//!
//! Event registration and capacity engine for the UniVibe campus platform.
//! This library provides the registration service (join/leave with capacity
//! enforcement), the ticket/check-in subsystem, and the status sweeper that
//! advances event lifecycle state on a schedule.

#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, UniVibeError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
