//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, UniVibeError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_ticket_config(&settings.tickets)?;
    validate_sweeper_config(&settings.sweeper)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(UniVibeError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(UniVibeError::Config("Server port must be greater than 0".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(UniVibeError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(UniVibeError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(UniVibeError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate check-in ticket configuration
fn validate_ticket_config(config: &super::TicketConfig) -> Result<()> {
    if config.secret.is_empty() {
        return Err(UniVibeError::Config("Ticket signing secret is required".to_string()));
    }

    if config.secret.len() < 32 {
        return Err(UniVibeError::Config(
            "Ticket signing secret must be at least 32 characters".to_string(),
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(UniVibeError::Config(
            "Ticket TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate sweeper configuration
fn validate_sweeper_config(config: &super::SweeperConfig) -> Result<()> {
    if config.interval_seconds == 0 {
        return Err(UniVibeError::Config(
            "Sweeper interval must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(UniVibeError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(UniVibeError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
