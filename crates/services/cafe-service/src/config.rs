//! Cafe service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};
use domain::{
    DEFAULT_DATABASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_CONNECTIONS,
};

/// Cafe service configuration.
#[derive(Debug, Clone)]
pub struct CafeServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl CafeServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            service: ServiceConfig {
                service_name: "cafe-service".to_string(),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            },
            database: DatabaseConfig {
                url: env::var("CAFE_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MIN_CONNECTIONS),
                sqlx_logging: env::var("DATABASE_SQLX_LOGGING")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
        }
    }
}

impl Default for CafeServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "cafe-service".to_string(),
                log_level: DEFAULT_LOG_LEVEL.to_string(),
            },
            database: DatabaseConfig::default(),
        }
    }
}
