//! HTTP route handlers and router composition.
//!
//! - `auth`: login and token issuance
//! - `content`: generic handlers for products, services and the one-row content tables
//! - `extract`: JSON/path extractors with API-shaped rejections
//! - `health`: liveness, readiness and version endpoints
//! - `upload`: admin image upload
//! - `users`: admin user management

pub mod auth;
pub mod content;
pub mod extract;
pub mod health;
pub mod upload;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware;
use crate::state::AppState;
use crate::types::{About, Contact, Footer, Hero, Product, Service};
use content::{create, delete, get_singleton, list, put_singleton, update};

/// Global request body limit (JSON payloads).
const BODY_LIMIT: usize = 2 * 1024 * 1024;
/// Headroom on top of the file size for multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes behind the bearer-token gate, mounted at `/api/admin`.
fn admin_routes(state: &AppState) -> Router<AppState> {
    let upload_limit = state.config.uploads.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .route("/products", get(list::<Product>).post(create::<Product>))
        .route("/products/{id}", put(update::<Product>).delete(delete::<Product>))
        .route("/services", get(list::<Service>).post(create::<Service>))
        .route("/services/{id}", put(update::<Service>).delete(delete::<Service>))
        .route("/about", get(get_singleton::<About>).put(put_singleton::<About>))
        .route("/contact", get(get_singleton::<Contact>).put(put_singleton::<Contact>))
        .route("/hero", get(get_singleton::<Hero>).put(put_singleton::<Hero>))
        .route("/footer", get(get_singleton::<Footer>).put(put_singleton::<Footer>))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", put(users::update_user).delete(users::delete_user))
        .route("/upload", post(upload::upload).layer(DefaultBodyLimit::max(upload_limit)))
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_admin))
}

/// Read-only mirrors for the public site, mounted at `/api`.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/products", get(list::<Product>))
        .route("/services", get(list::<Service>))
        .route("/about", get(get_singleton::<About>))
        .route("/contact", get(get_singleton::<Contact>))
        .route("/contact/submit", post(content::submit_contact_message))
        .route("/hero", get(get_singleton::<Hero>))
        .route("/footer", get(get_singleton::<Footer>))
}

/// Builds the complete application router with all layers applied.
pub fn router(state: AppState) -> Router {
    let cfg = state.config.clone();
    let uploads = ServeDir::new(&cfg.uploads.dir);

    let app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/version", get(health::version))
        .nest("/api/admin", admin_routes(&state))
        .nest("/api", public_routes())
        .nest_service("/uploads", uploads)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(from_fn(middleware::cors::answer_options))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg.clone(), middleware::security_headers::security_headers_middleware))
        .layer(middleware::cors::cors_layer(&cfg.cors));

    app.layer(from_fn(middleware::cors::preflight_no_content))
}
