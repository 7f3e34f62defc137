//! User service configuration.

use std::env;

use common::{DatabaseConfig, StoreBackend};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Record store backend and connection URL
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        let backend = match env::var("USER_STORE") {
            Ok(name) => StoreBackend::parse(&name).unwrap_or_else(|| {
                tracing::warn!("Unknown USER_STORE '{}', falling back to postgres", name);
                StoreBackend::Postgres
            }),
            Err(_) => defaults.backend,
        };

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                backend,
            },
        }
    }

    /// In-memory configuration, used for local runs and tests.
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseConfig {
                backend: StoreBackend::Memory,
                ..DatabaseConfig::default()
            },
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
        }
    }
}
