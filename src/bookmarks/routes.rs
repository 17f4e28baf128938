use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes(base_path: &str) -> Router<AppState> {
    let base = base_path.trim_end_matches('/');
    let item = format!("{}/:id", base);

    let router = Router::new()
        .route(&item, get(handler::get_bookmark))
        .route(&item, patch(handler::update_bookmark))
        .route(&item, delete(handler::delete_bookmark))
        .route(&format!("{}/", base), get(handler::list_bookmarks))
        .route(&format!("{}/", base), post(handler::create_bookmark));

    // `{base}` and `{base}/` both address the collection
    if base.is_empty() {
        return router;
    }
    router
        .route(base, get(handler::list_bookmarks))
        .route(base, post(handler::create_bookmark))
}
