//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub tickets: TicketConfig,
    pub sweeper: SweeperConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Check-in ticket configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketConfig {
    /// HMAC secret shared with this service only
    pub secret: String,
    /// Token time-to-live; bounds the replay exposure window
    pub ttl_seconds: u64,
}

/// Status sweeper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweeperConfig {
    pub interval_seconds: u64,
    pub run_on_startup: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("UNIVIBE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::UniVibeError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3003,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/univibe_events".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            tickets: TicketConfig {
                secret: String::new(),
                ttl_seconds: 90,
            },
            sweeper: SweeperConfig {
                interval_seconds: 3600,
                run_on_startup: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/univibe".to_string(),
            },
        }
    }
}
