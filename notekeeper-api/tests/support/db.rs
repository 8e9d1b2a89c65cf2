#![allow(dead_code)]

use notekeeper_api::{AppConfig, DbClient};

/// Connect using the same `NOTEKEEPER_*` settings as the server.
pub async fn test_db_client() -> DbClient {
    let config = AppConfig::load().expect("valid test configuration");
    DbClient::connect(&config.db)
        .await
        .expect("Failed to connect to test database")
}
