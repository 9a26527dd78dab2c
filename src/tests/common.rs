use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret-0123456789abcdef";
pub const ADMIN_PASSWORD: &str = "admin123";

/// A single-connection in-memory database with the schema applied.
///
/// One connection that never expires keeps the in-memory database alive for
/// the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::init_db(&pool, ADMIN_PASSWORD).await.unwrap();
    pool
}

pub fn test_config(upload_dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.uploads.dir = upload_dir.display().to_string();
    config.uploads.max_file_size = 1024;
    config
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub uploads: TempDir,
}

pub async fn test_app() -> TestApp {
    let uploads = TempDir::new().unwrap();
    let pool = test_pool().await;
    let state = AppState::new(pool, test_config(uploads.path()));
    let router = crate::routes::router(state.clone());
    TestApp { router, state, uploads }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, body)
    }

    /// Logs in as the seeded admin and returns the bearer token.
    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                serde_json::json!({ "username": "admin", "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}
