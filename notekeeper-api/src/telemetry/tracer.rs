//! Tracing Subscriber Initialization

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;
use crate::error::{ApiError, ApiResult};

/// Default log filter for an environment, used when `RUST_LOG` is unset.
pub fn default_filter(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "notekeeper_api=debug,tower_http=debug,info",
        Environment::Prod => "notekeeper_api=info,tower_http=info,warn",
    }
}

/// Install the global tracing subscriber.
///
/// Local runs get compact human-readable lines; dev and prod emit JSON.
/// Call once at startup.
pub fn init_tracing(env: Environment) -> ApiResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match env {
        Environment::Local => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        Environment::Dev | Environment::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    result.map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(environment = %env, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for env in [Environment::Local, Environment::Dev, Environment::Prod] {
            let filter = default_filter(env);
            assert!(EnvFilter::try_new(filter).is_ok(), "bad filter {}", filter);
        }
    }

    #[test]
    fn test_prod_is_quieter() {
        assert!(default_filter(Environment::Local).contains("notekeeper_api=debug"));
        assert!(default_filter(Environment::Prod).contains("notekeeper_api=info"));
        assert!(default_filter(Environment::Prod).ends_with("warn"));
    }

    #[test]
    fn test_second_init_fails() {
        // Whichever call loses the race for the global subscriber reports an error.
        let first = init_tracing(Environment::Local);
        let second = init_tracing(Environment::Local);
        assert!(first.is_err() || second.is_err());
    }
}
