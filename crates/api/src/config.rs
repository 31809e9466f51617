//! # API Configuration Module
//!
//! This module handles loading configuration for the Where2Tattoo API server
//! from environment variables, with defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Connection pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `AVAILABILITY_FAIL_MODE`: `open` offers every slot when booked times
//!   cannot be fetched, `closed` answers 503 instead (default: "open")

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;
use where2tattoo_core::availability::taken::FailMode;

/// Configuration for the Where2Tattoo API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// What availability lookups do when booked times cannot be fetched
    pub fail_mode: FailMode,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT or DATABASE_MAX_CONNECTIONS value is not a number
    /// - AVAILABILITY_FAIL_MODE is neither `open` nor `closed`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;
        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Availability settings
        let fail_mode = match lookup("AVAILABILITY_FAIL_MODE") {
            Some(mode) => mode.parse().wrap_err("Invalid AVAILABILITY_FAIL_MODE value")?,
            None => FailMode::default(),
        };

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            fail_mode,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
