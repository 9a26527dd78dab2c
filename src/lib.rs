//! # Vitrine Backend Library
//!
//! Content-management backend for a small business website. Public visitors
//! read products, services and page content; a single admin role edits it
//! through bearer-token protected endpoints.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access
//! - **Tokio**: async runtime
//! - **jsonwebtoken / argon2**: stateless admin tokens and password hashing
//!
//! ## Core Components
//!
//! - [`auth`]: password hashing and token issue/verify
//! - [`config`]: layered configuration (defaults, files, environment)
//! - [`db`]: schema initialization and admin seeding
//! - [`error`]: error taxonomy and HTTP error responses
//! - [`middleware`]: admin gate, CORS, security headers
//! - [`routes`]: HTTP handlers and router composition
//! - [`state`]: shared application state
//! - [`store`]: generic table and singleton data access
//! - [`types`]: records and request/response payloads

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
