//! Media blob controller.

use crate::{responses::AppError, state::AppState};
use palaver_core::PalaverError;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use uuid::Uuid;

/// Creates the media router.
pub fn router() -> Router<AppState> {
    Router::new().route("/media/:id", get(fetch_blob))
}

/// Serves a stored media blob. URLs are unguessable UUIDs handed out at
/// upload time, so the endpoint itself is unauthenticated.
async fn fetch_blob(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id: Uuid = id
        .parse()
        .map_err(|_| AppError(PalaverError::Validation(format!("Invalid media ID: {}", id))))?;

    let data = state.media_store.fetch(id).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        data,
    )
        .into_response())
}
