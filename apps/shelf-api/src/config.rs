//! Server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                        | Default            |
//! |---------------------------------|--------------------|
//! | `SHELF_BIND_ADDR`               | `0.0.0.0:8080`     |
//! | `SHELF_DB_PATH`                 | `./data/shelf.db`  |
//! | `SHELF_DB_MAX_CONNECTIONS`      | `5`                |
//! | `SHELF_DB_CONNECT_TIMEOUT_SECS` | `30`               |
//! | `SHELF_DB_RUN_MIGRATIONS`       | `true`             |
//! | `SHELF_SEED_INVENTORY`          | `true`             |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use shelf_db::DbConfig;

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// SQLite file, or `:memory:`
    pub db_path: PathBuf,

    /// Pool size (forced to 1 for `:memory:`)
    pub db_max_connections: u32,

    /// How long a request waits for a pooled connection
    pub db_connect_timeout: Duration,

    /// Apply embedded migrations when the pool opens
    pub db_run_migrations: bool,

    /// Start with the three demo inventory units
    pub seed_inventory: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            bind_addr: var("SHELF_BIND_ADDR", "0.0.0.0:8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHELF_BIND_ADDR".to_string()))?,

            db_path: PathBuf::from(var("SHELF_DB_PATH", "./data/shelf.db")),

            db_max_connections: var("SHELF_DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHELF_DB_MAX_CONNECTIONS".to_string()))?,

            db_connect_timeout: var("SHELF_DB_CONNECT_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ConfigError::InvalidValue("SHELF_DB_CONNECT_TIMEOUT_SECS".to_string())
                })?,

            db_run_migrations: var("SHELF_DB_RUN_MIGRATIONS", "true")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHELF_DB_RUN_MIGRATIONS".to_string()))?,

            seed_inventory: var("SHELF_SEED_INVENTORY", "true")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHELF_SEED_INVENTORY".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "SHELF_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.db_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("SHELF_DB_PATH".to_string()));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone())
            .max_connections(self.db_max_connections)
            .connect_timeout(self.db_connect_timeout)
            .run_migrations(self.db_run_migrations)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
