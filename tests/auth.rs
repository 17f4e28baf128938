mod common;

use axum::http::StatusCode;
use common::{API_TOKEN, BACKENDS, authed, make_bookmarks_fixtures, seed, send, spawn_app};
use serde_json::json;

const BASE: &str = "/bookmarks";

fn unauthorized_body() -> serde_json::Value {
    json!({ "error": "Unauthorized request" })
}

#[tokio::test]
async fn missing_token_is_rejected_on_every_route() {
    for backend in BACKENDS {
        let app = spawn_app(backend, BASE).await;
        seed(&app.repo, &make_bookmarks_fixtures()).await;

        let requests = [
            ("GET", "/bookmarks".to_string(), None),
            ("GET", "/bookmarks/1".to_string(), None),
            ("POST", "/bookmarks".to_string(), Some(json!({ "title": "t", "url": "u", "rating": 3 }))),
            ("PATCH", "/bookmarks/1".to_string(), Some(json!({ "title": "t" }))),
            ("DELETE", "/bookmarks/1".to_string(), None),
            ("GET", "/somewhere/else".to_string(), None),
            ("PUT", "/bookmarks/1".to_string(), None),
        ];

        for (method, uri, body) in requests {
            let res = send(&app.router, method, &uri, None, body).await;
            assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{backend:?} {method} {uri}");
            assert_eq!(res.json(), unauthorized_body());
        }

        // nothing was written or removed
        assert_eq!(app.repo.list_all().await.unwrap().len(), 4);
        assert_eq!(app.repo.get_by_id(1).await.unwrap().unwrap().title, "First Bookmark");
    }
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let app = spawn_app(common::Backend::Memory, BASE).await;

    let res = send(&app.router, "GET", BASE, Some("bad token"), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json(), unauthorized_body());

    let almost = format!("{API_TOKEN}x");
    let res = send(&app.router, "GET", BASE, Some(&almost), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_the_handlers() {
    let app = spawn_app(common::Backend::Sql, BASE).await;

    let res = authed(&app.router, "GET", BASE, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.unwrap().starts_with("application/json"));

    let res = authed(&app.router, "GET", "/somewhere/else", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text(), "404 Not Found");
}
