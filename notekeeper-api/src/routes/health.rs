//! Probe endpoints, nested under `/health`.
//!
//! `ping` and `live` never touch the store. `ready` runs the store's
//! `health_check` and answers 503 `SERVICE_UNAVAILABLE` when it fails.

use axum::{extract::State, routing::get, Json, Router};
use notekeeper_storage::NoteStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{ApiError, ApiResult};

const HEALTHY: &str = "healthy";

/// Report returned by a passing probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ProbeReport {
    /// Always `healthy`; failures use the error body instead
    pub status: String,
    pub version: String,
    /// Seconds since the router was built
    pub uptime_seconds: u64,
    /// Store round trip, only reported by `/health/ready`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_latency_ms: Option<u64>,
}

#[derive(Clone)]
pub struct ProbeState {
    store: Arc<dyn NoteStore>,
    started: Instant,
}

impl ProbeState {
    fn report(&self, store_latency_ms: Option<u64>) -> ProbeReport {
        ProbeReport {
            status: HEALTHY.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.started.elapsed().as_secs(),
            store_latency_ms,
        }
    }
}

/// GET /health/ping
#[utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses((status = 200, description = "Plain-text pong", body = String)),
)]
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /health/live - the process is up and serving requests
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is serving", body = ProbeReport)),
)]
pub async fn liveness(State(state): State<Arc<ProbeState>>) -> Json<ProbeReport> {
    Json(state.report(None))
}

/// GET /health/ready - the store answers a trivial query
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = ProbeReport),
        (status = 503, description = "Store unreachable", body = ApiError),
    ),
)]
#[tracing::instrument(skip_all, fields(op = "health_check"))]
pub async fn readiness(State(state): State<Arc<ProbeState>>) -> ApiResult<Json<ProbeReport>> {
    let probe_start = Instant::now();
    state.store.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Store not ready");
        ApiError::service_unavailable()
    })?;
    let latency = u64::try_from(probe_start.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok(Json(state.report(Some(latency))))
}

/// Probe routes over `store`; the uptime clock starts here.
pub fn create_router(store: Arc<dyn NoteStore>) -> Router {
    let state = Arc::new(ProbeState {
        store,
        started: Instant::now(),
    });

    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeeper_storage::MockStorage;

    fn state(storage: &MockStorage) -> Arc<ProbeState> {
        Arc::new(ProbeState {
            store: Arc::new(storage.clone()),
            started: Instant::now(),
        })
    }

    #[tokio::test]
    async fn test_liveness_skips_the_store() {
        let storage = MockStorage::new();
        storage.set_offline(true);
        let Json(report) = liveness(State(state(&storage))).await;
        assert_eq!(report.status, "healthy");
        assert_eq!(report.store_latency_ms, None);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("store_latency_ms").is_none());
    }

    #[tokio::test]
    async fn test_readiness_follows_store() {
        let storage = MockStorage::new();
        let Json(report) = readiness(State(state(&storage))).await.unwrap();
        assert!(report.store_latency_ms.is_some());

        storage.set_offline(true);
        let err = readiness(State(state(&storage))).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ServiceUnavailable);
    }
}
