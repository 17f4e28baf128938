#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bookmarks::config::Config;
use bookmarks::db::Database;
use bookmarks::handler::{self, AppState};
use bookmarks::model::{Bookmark, NewBookmark};
use bookmarks::repository::{BookmarkRepository, MemoryRepository, SqlRepository};
use serde_json::Value;
use tower::ServiceExt;

pub const API_TOKEN: &str = "test-token";

#[derive(Clone, Copy, Debug)]
pub enum Backend {
    Memory,
    Sql,
}

pub const BACKENDS: [Backend; 2] = [Backend::Memory, Backend::Sql];

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<dyn BookmarkRepository>,
}

pub async fn repository(backend: Backend) -> Arc<dyn BookmarkRepository> {
    match backend {
        Backend::Memory => Arc::new(MemoryRepository::new()),
        Backend::Sql => {
            let db = Database::open_in_memory()
                .await
                .expect("failed to open in-memory database");
            Arc::new(SqlRepository::new(db))
        }
    }
}

pub async fn spawn_app(backend: Backend, base_path: &str) -> TestApp {
    spawn_app_with(repository(backend).await, base_path)
}

pub fn spawn_app_with(repo: Arc<dyn BookmarkRepository>, base_path: &str) -> TestApp {
    let yaml = format!("app:\n  api_token: {API_TOKEN}\n  base_path: {base_path}\n");
    let cfg = Config::from_yaml(&yaml).expect("test config must parse");
    let router = handler::router(AppState::new(repo.clone(), &cfg.app));
    TestApp { router, repo }
}

pub fn make_bookmarks_fixtures() -> Vec<Bookmark> {
    let lorem = "Lorem ipsum dolor sit amet, consectetur adipisicing elit.";
    [
        (1, "First Bookmark", "https://111.com", 4),
        (2, "Second Bookmark", "https://222.com", 5),
        (3, "Third Bookmark", "https://333.com", 1),
        (4, "Fourth Bookmark", "https://444.com", 3),
    ]
    .into_iter()
    .map(|(id, title, url, rating)| Bookmark {
        id,
        title: title.to_string(),
        url: url.to_string(),
        rating,
        description: Some(lorem.to_string()),
    })
    .collect()
}

pub async fn seed(repo: &Arc<dyn BookmarkRepository>, fixtures: &[Bookmark]) {
    for fixture in fixtures {
        let stored = repo
            .insert(NewBookmark {
                id: Some(fixture.id),
                title: fixture.title.clone(),
                url: fixture.url.clone(),
                rating: fixture.rating,
                description: fixture.description.clone(),
            })
            .await
            .expect("failed to seed fixture");
        assert_eq!(stored.id, fixture.id);
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();

    TestResponse {
        status,
        location,
        content_type,
        body,
    }
}

pub async fn authed(router: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    send(router, method, uri, Some(API_TOKEN), body).await
}
