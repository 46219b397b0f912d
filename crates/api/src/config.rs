//! # API Configuration Module
//!
//! Loads the ClinicBook server configuration from environment variables,
//! with defaults for everything except the database connection string.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: whole-request timeout (default: 30)
//! - `DB_MAX_CONNECTIONS`: connection pool size (default: 5)
//! - `QUERY_TIMEOUT_SECONDS`: per storage call deadline (default: 5)
//! - `RATING_TIMEOUT_SECONDS`: deadline for rating recomputation (default: 30)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use clinicbook_core::BookingConfig;
use eyre::{Result, WrapErr};
use tracing::Level;

/// Configuration for the ClinicBook API server
///
/// # Example
///
/// ```no_run
/// use clinicbook_api::config::ApiConfig;
///
/// fn example() -> eyre::Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Maximum size of the database connection pool
    pub db_max_connections: u32,

    /// Deadline for a single storage call, in seconds
    pub query_timeout: u64,

    /// Deadline for a rating recomputation, in seconds
    pub rating_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Fails if `DATABASE_URL` is not set or a numeric setting cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 3000)?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", clinicbook_db::DEFAULT_MAX_CONNECTIONS)?;

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

        // Timeouts
        let request_timeout = parse_or(&lookup, "API_REQUEST_TIMEOUT_SECONDS", 30)?;
        let defaults = BookingConfig::default();
        let query_timeout =
            parse_or(&lookup, "QUERY_TIMEOUT_SECONDS", defaults.query_timeout.as_secs())?;
        let rating_timeout =
            parse_or(&lookup, "RATING_TIMEOUT_SECONDS", defaults.rating_timeout.as_secs())?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            db_max_connections,
            query_timeout,
            rating_timeout,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Time budgets handed to the booking core.
    pub fn booking_config(&self) -> BookingConfig {
        BookingConfig {
            query_timeout: Duration::from_secs(self.query_timeout),
            rating_timeout: Duration::from_secs(self.rating_timeout),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {key} value: {value:?}")),
        None => Ok(default),
    }
}
