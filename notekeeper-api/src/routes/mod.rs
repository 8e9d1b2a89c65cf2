//! REST API Routes Module
//!
//! - Note CRUD at /notes and /notes/:id
//! - Health checks at /health/*
//! - OpenAPI document at /openapi.json
//! - CORS and per-request tracing on every route

pub mod health;
pub mod note;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use notekeeper_storage::NoteStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::openapi::ApiDoc;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build CORS layer from configuration.
///
/// With no configured origins every origin, method and header is allowed.
/// Otherwise only the listed origins are.
pub fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: restricted origins");
        cors.allow_origin(config.cors_origins.clone())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    }
}

/// Create the complete API router.
pub fn create_api_router(store: Arc<dyn NoteStore>, api_config: &ApiConfig) -> Router {
    Router::new()
        .merge(note::create_router(store.clone()))
        .nest("/health", health::create_router(store))
        .route("/openapi.json", get(openapi_json))
        .layer(build_cors_layer(api_config))
        .layer(TraceLayer::new_for_http())
}
