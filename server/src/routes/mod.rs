//! HTTP routes exposed to clients
//!
//! This module organizes routes into logical submodules:
//! - `computers`: list with filter, create, edit, delete
//! - `images`: image fetch and attach

pub mod computers;
pub mod images;

use crate::app::AppState;
use axum::routing::get;
use axum::{Json, Router};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(computers::routes())
        .merge(images::routes())
        .with_state(state)
}

/// Liveness probe
async fn health() -> Json<AppInfo> {
    Json(AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
    })
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub status: String,
}
