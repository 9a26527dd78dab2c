//! Middleware components for HTTP request processing.
//!
//! - `auth`: bearer-token gate for the admin route group
//! - `cors`: CORS layer and `OPTIONS` handling
//! - `security_headers`: hardening and caching headers on every response

pub mod auth;
pub mod cors;
pub mod security_headers;
