//! HTTP Handlers for the Bookmarks API

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ValidationError};
use crate::handler::AppState;
use crate::model::{Bookmark, BookmarkPayload, PatchPayload};
use crate::validation::sanitize_for_output;

// A non-numeric id cannot name a stored bookmark, so it is reported as absent.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|e| ValidationError::MalformedBody(e.body_text()))
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bookmarks = state.repo.list_all().await?;
    let sanitized: Vec<Bookmark> = bookmarks.iter().map(sanitize_for_output).collect();

    tracing::debug!(count = sanitized.len(), "listed bookmarks");
    Ok((StatusCode::OK, Json(sanitized)).into_response())
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    match state.repo.get_by_id(id).await? {
        Some(bookmark) => Ok((StatusCode::OK, Json(sanitize_for_output(&bookmark))).into_response()),
        None => {
            tracing::info!(id, "bookmark not found");
            Err(ApiError::NotFound)
        }
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<BookmarkPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let new_bookmark = body(payload)?.into_new_bookmark()?;
    let bookmark = state.repo.insert(new_bookmark).await?;

    tracing::info!(id = bookmark.id, url = %bookmark.url, "bookmark created");

    let location = state.bookmark_path(bookmark.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sanitize_for_output(&bookmark)),
    )
        .into_response())
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PatchPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let patch = body(payload)?.into_patch()?;
    let id = parse_id(&id)?;

    if state.repo.update(id, patch).await? == 0 {
        tracing::info!(id, "bookmark not found for update");
        return Err(ApiError::NotFound);
    }

    tracing::info!(id, "bookmark updated");
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    if state.repo.get_by_id(id).await?.is_none() {
        tracing::info!(id, "bookmark not found for delete");
        return Err(ApiError::NotFound);
    }

    state.repo.delete(id).await?;
    tracing::info!(id, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
