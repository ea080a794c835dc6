//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and handed to the router through AppState.

use crate::config::StoreConfig;
use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{ComputersService, ImagesService};
use crate::storage::{BlobStore, DbBlobStore};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub computers_service: ComputersService,
    pub images_service: ImagesService,
}

impl AppState {
    /// Build services over an explicit store handle and blob store.
    pub fn new(repo: Repository, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            computers_service: ComputersService::new(repo.clone()),
            images_service: ImagesService::new(repo, blob_store),
        }
    }

    /// Build services whose records and images share one database.
    pub fn from_pool(pool: SqlitePool) -> Self {
        let blob_store: Arc<dyn BlobStore> = Arc::new(DbBlobStore::new(pool.clone()));
        Self::new(Repository::new(pool), blob_store)
    }
}

/// Application setup - called once on startup
pub async fn setup(config: &StoreConfig) -> Result<AppState> {
    tracing::info!("Initializing application");

    let pool = create_pool(config).await?;
    let state = AppState::from_pool(pool);

    tracing::info!("Application initialized successfully");

    Ok(state)
}
