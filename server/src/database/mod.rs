//! Database module
//!
//! This module provides the record store:
//! - Schema and migrations
//! - Model definitions
//! - Repository layer for the `Computers` collection

pub mod models;
pub mod repository;
pub mod schema;

pub use models::*;
pub use repository::Repository;
pub use schema::initialize_database;

use crate::config::StoreConfig;
use crate::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Build connection options shared by migration and application connections.
fn connect_options(database_url: &str) -> std::result::Result<SqliteConnectOptions, sqlx::Error> {
    SqliteConnectOptions::from_str(database_url).map(|opts| {
        opts.create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
    })
}

/// Create and initialize a database connection pool.
///
/// Migrations run on a dedicated single-connection pool that is closed
/// before the application pool is created, so every pooled connection
/// sees the final schema.
pub async fn create_pool(config: &StoreConfig) -> Result<SqlitePool> {
    tracing::info!("Creating database connection pool for: {}", config.database_url);

    let options = connect_options(&config.database_url)?;

    // Ensure the database directory exists
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Run migrations on a single connection first
    let migration_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options.clone())
        .await?;

    initialize_database(&migration_pool).await?;
    migration_pool.close().await;

    // Create the application pool against the migrated schema
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!("Database pool created successfully");

    Ok(pool)
}

/// Parse a caller-supplied identifier into its canonical stored form.
///
/// Malformed identifiers are reported as `InvalidInput`, never as not-found.
pub fn parse_id(id: &str) -> Result<String> {
    Uuid::parse_str(id.trim())
        .map(|uuid| uuid.to_string())
        .map_err(|_| AppError::InvalidInput(format!("malformed identifier: {:?}", id)))
}
