use std::fmt;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::{ErrorResponse, UnauthorizedResponse};

pub const NOT_FOUND_BODY: &str = "404 Not Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
    Rating,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Url => "url",
            Field::Rating => "rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid data - {0} required")]
    MissingField(Field),
    #[error("Invalid data - rating needs to be from 1-5 only")]
    RatingOutOfRange,
    #[error("Request body must contain either title, url, rating or description")]
    EmptyUpdate,
    #[error("Invalid data - {0}")]
    MalformedBody(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable(#[from] libsql::Error),
    #[error("invalid row: {0}")]
    InvalidRow(String),
    #[error("no free bookmark id left")]
    IdsExhausted,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized request")]
    Unauthorized,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(UnauthorizedResponse::new("Unauthorized request")),
            )
                .into_response(),
            ApiError::Validation(e) => {
                tracing::warn!(error = %e, "rejected bookmark request");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&e.to_string()))).into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                NOT_FOUND_BODY,
            )
                .into_response(),
            ApiError::Storage(e) => {
                tracing::error!(error = %crate::unpack_error(&e), "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("server error")),
                )
                    .into_response()
            }
        }
    }
}
