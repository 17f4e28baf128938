use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::handler::AppState;

/// Rejects every request whose `Authorization` header is not
/// `Bearer <api_token>`, before it reaches any route.
pub async fn require_bearer(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match bearer_token(&headers) {
        Some(token) if token_matches(token, &state.api_token) => Ok(next.run(request).await),
        _ => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "unauthorized request"
            );
            Err(ApiError::Unauthorized)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ")
}

// constant time in the token length
fn token_matches(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
