//! Computer routes
//!
//! List with filter, create, edit (fetch then submit) and delete.

use crate::app::AppState;
use crate::database::{Computer, ComputerFilter, ComputerList, CreateComputerRequest};
use crate::error::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/computers", get(list_computers).post(create_computer))
        .route(
            "/computers/{id}",
            get(get_computer).put(update_computer).delete(delete_computer),
        )
}

/// Edit form submission; the id comes from the path
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateComputerBody {
    name: String,
    year: i32,
    #[serde(default)]
    image_id: Option<String>,
}

/// List computers matching the query filter
async fn list_computers(
    State(state): State<AppState>,
    Query(filter): Query<ComputerFilter>,
) -> Result<Json<ComputerList>> {
    Ok(Json(state.computers_service.list(filter).await?))
}

/// Create a computer
async fn create_computer(
    State(state): State<AppState>,
    Json(body): Json<CreateComputerRequest>,
) -> Result<(StatusCode, Json<Computer>)> {
    let computer = state.computers_service.create(body).await?;
    Ok((StatusCode::CREATED, Json(computer)))
}

/// Fetch a computer for editing
async fn get_computer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Computer>> {
    Ok(Json(state.computers_service.get(&id).await?))
}

/// Replace a computer with the submitted fields
async fn update_computer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateComputerBody>,
) -> Result<StatusCode> {
    state
        .computers_service
        .update(Computer {
            id,
            name: body.name,
            year: body.year,
            image_id: body.image_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a computer
async fn delete_computer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.computers_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
