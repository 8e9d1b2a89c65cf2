//! NOTEKEEPER API - HTTP layer for the notes service
//!
//! Axum routes over a `NoteStore`, the PostgreSQL implementation of that
//! store, configuration loading and logging setup.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, Environment, HttpConfig};
pub use db::{DbClient, DbConfig, SslMode};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::{build_cors_layer, create_api_router};
pub use types::*;
