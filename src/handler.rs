use std::sync::Arc;

use axum::{Router, http::Method, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::bookmarks;
use crate::config::App;
use crate::error::ApiError;
use crate::repository::BookmarkRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BookmarkRepository>,
    pub api_token: Arc<str>,
    pub base_path: Arc<str>,
}

impl AppState {
    pub fn new(repo: Arc<dyn BookmarkRepository>, app: &App) -> Self {
        AppState {
            repo,
            api_token: Arc::from(app.get_api_token()),
            base_path: Arc::from(app.get_base_path()),
        }
    }

    /// Path of a single bookmark, used for the `Location` header.
    pub fn bookmark_path(&self, id: i64) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), id)
    }
}

async fn fallback() -> ApiError {
    ApiError::NotFound
}

/// The complete service: bookmark routes under the configured base path,
/// every route and the fallback behind bearer authentication.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .merge(bookmarks::routes(&state.base_path))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
