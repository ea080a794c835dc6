//! Image routes
//!
//! Fetch an image by blob id, attach (or replace) the image of a computer.

use crate::app::AppState;
use crate::config::{DEFAULT_IMAGE_NAME, MAX_IMAGE_BYTES};
use crate::database::Computer;
use crate::error::Result;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/images/{id}", get(get_image))
        .route(
            "/computers/{id}/image",
            put(store_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
}

#[derive(Deserialize)]
struct StoreImageQuery {
    name: Option<String>,
}

/// Get image bytes by blob id
async fn get_image(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let (info, data) = state.images_service.get_image(&id).await?;

    let disposition = format!("inline; filename=\"{}\"", info.filename.replace('"', ""));
    let disposition =
        HeaderValue::from_str(&disposition).unwrap_or_else(|_| HeaderValue::from_static("inline"));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// Store the request body as the computer's image, replacing any previous one
async fn store_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StoreImageQuery>,
    body: Bytes,
) -> Result<Json<Computer>> {
    let name = query.name.unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string());
    let computer = state
        .images_service
        .store_image(&id, &name, &body[..])
        .await?;
    Ok(Json(computer))
}
