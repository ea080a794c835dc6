//! Application configuration
//!
//! Constants for store naming and resource limits, plus the explicit
//! configuration structs resolved once at startup.

use clap::Parser;
use std::time::Duration;

// ===== Store Naming =====

/// Collection (table) holding computer records
pub const COLLECTION_NAME: &str = "Computers";

/// Bucket (table) holding image blobs, in the same database as the records
pub const IMAGE_BUCKET_NAME: &str = "images";

// ===== Limits =====

/// Maximum length of a stored image filename
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Maximum accepted image upload size (16 MiB)
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Filename used when an upload name is empty after sanitizing
pub const DEFAULT_IMAGE_NAME: &str = "image";

// ===== Defaults =====

pub const DEFAULT_DATABASE_URL: &str = "sqlite://computers.db?mode=rwc";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the document store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection string identifying the target database
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

/// Command-line configuration for the server binary
#[derive(Parser, Debug, Clone)]
#[command(name = "computer-catalog", about = "Computer catalog web service")]
pub struct ServerConfig {
    /// Database connection string
    #[arg(long, env = "COMPUTERS_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Listen address for the HTTP server
    #[arg(long, env = "COMPUTERS_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// Maximum pooled database connections
    #[arg(long, env = "COMPUTERS_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl ServerConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            ..StoreConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn declared_default(id: &str) -> String {
        let command = ServerConfig::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == id)
            .unwrap();
        arg.get_default_values()[0].to_string_lossy().into_owned()
    }

    #[test]
    fn test_store_defaults() {
        let store = StoreConfig::default();
        assert_eq!(store.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(store.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(store.acquire_timeout, Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS));
    }

    #[test]
    fn test_declared_flag_defaults() {
        // Read from the command definition so COMPUTERS_* in the environment cannot interfere
        assert_eq!(declared_default("database_url"), DEFAULT_DATABASE_URL);
        assert_eq!(declared_default("listen"), DEFAULT_LISTEN);
        assert_eq!(declared_default("max_connections"), DEFAULT_MAX_CONNECTIONS.to_string());
    }

    #[test]
    fn test_store_config_keeps_acquire_timeout() {
        let config = ServerConfig::parse_from(["computer-catalog", "--max-connections", "3"]);

        let store = config.store_config();
        assert_eq!(store.max_connections, 3);
        assert_eq!(store.acquire_timeout, Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "computer-catalog",
            "--database-url",
            "sqlite::memory:",
            "--listen",
            "127.0.0.1:9000",
            "--max-connections",
            "2",
        ]);

        let store = config.store_config();
        assert_eq!(store.database_url, "sqlite::memory:");
        assert_eq!(store.max_connections, 2);
        assert_eq!(config.listen, "127.0.0.1:9000");
    }
}
