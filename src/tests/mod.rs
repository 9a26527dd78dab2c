//! Integration and unit tests for the Vitrine backend.
//!
//! ## Test Modules
//!
//! - **common**: shared fixtures (in-memory database, router, request helpers)
//! - **api_tests**: HTTP-level behaviour of the public and admin routes
//! - **auth_tests**: token issue/verify and login
//! - **config_tests**: configuration loading and validation
//! - **db_tests**: schema initialization and the data access layer
//! - **error_tests**: error-to-response mapping
//! - **health_api_tests**: health, readiness and version endpoints
//!
//! Run with `cargo test`, or a single module with e.g. `cargo test db_tests`.

pub mod common;

mod config_tests;
mod error_tests;
mod health_api_tests;
