//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the UniVibe event service.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "univibe-events.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin_id: Uuid, action: &str, target: Option<&str>) {
    warn!(
        admin_id = %admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log sweeper runs
pub fn log_sweep_summary(completed: u64, published: u64) {
    info!(
        events_completed = completed,
        events_published = published,
        "Status sweep completed"
    );
}
