use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;

/// The shared application state.
///
/// Cloned into every handler by Axum. Nothing in here is mutated after
/// startup; all content lives in the database behind `db`.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Signs and verifies admin bearer tokens with the configured secret.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Creates a new `AppState`, deriving the token service from `config.auth`.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
        Self { db, config: Arc::new(config), tokens: Arc::new(tokens) }
    }
}
