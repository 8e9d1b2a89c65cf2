//! NOTEKEEPER API Server Entry Point
//!
//! Loads configuration, connects to PostgreSQL (creating the notes table if
//! needed) and serves the API until Ctrl-C or SIGTERM.

use std::sync::Arc;

use notekeeper_api::{
    create_api_router, telemetry::init_tracing, ApiError, ApiResult, AppConfig, DbClient,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    // Logging is not up yet, so configuration problems go to stderr.
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        ApiError::from(e)
    })?;
    init_tracing(config.env)?;

    let db = DbClient::connect(&config.db).await?;
    let app = create_api_router(Arc::new(db), &config.api);

    let addr = config.http.address;
    tracing::info!(%addr, env = %config.env, "Starting NOTEKEEPER API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
