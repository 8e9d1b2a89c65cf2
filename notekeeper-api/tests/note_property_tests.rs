//! Property-based tests for the notes API.
//!
//! - Valid payloads always create a note that reads back unchanged.
//! - Invalid titles are rejected with 400 on both create and update and
//!   never reach the store.
//! - Any non-empty description is accepted, whitespace included.

use axum::http::{Method, StatusCode};
use notekeeper_test_utils::{
    arb_invalid_title, arb_valid_description, arb_valid_title, seeded_storage, MockStorage,
};
use proptest::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;

#[path = "support/http.rs"]
mod http_support;
use http_support::{send, test_app};

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_create_then_get_round_trips(
        title in arb_valid_title(),
        description in arb_valid_description(),
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let app = test_app(&MockStorage::new());
            let payload = json!({"title": title, "description": description}).to_string();

            let created = send(&app, Method::POST, "/notes", Some(&payload)).await;
            prop_assert_eq!(created.status, StatusCode::CREATED);
            let created = created.json();
            let id = created["id"].as_i64().unwrap_or_default();
            prop_assert!(id > 0);

            let fetched = send(&app, Method::GET, &format!("/notes/{}", id), None).await;
            prop_assert_eq!(fetched.status, StatusCode::OK);
            let fetched = fetched.json();
            prop_assert_eq!(&fetched["title"], &json!(title));
            prop_assert_eq!(&fetched["description"], &json!(description));
            prop_assert_eq!(&fetched, &created);
            Ok(())
        })?;
    }

    #[test]
    fn prop_invalid_title_never_reaches_store(
        title in arb_invalid_title(),
        description in arb_valid_description(),
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let storage = seeded_storage(1).await;
            let app = test_app(&storage);
            let payload = json!({"title": title, "description": description}).to_string();

            let response = send(&app, Method::POST, "/notes", Some(&payload)).await;
            prop_assert_eq!(response.status, StatusCode::BAD_REQUEST);
            prop_assert_eq!(response.error_code(), "INVALID_TITLE");

            let response = send(&app, Method::PUT, "/notes/1", Some(&payload)).await;
            prop_assert_eq!(response.status, StatusCode::BAD_REQUEST);
            prop_assert_eq!(response.error_code(), "INVALID_TITLE");

            prop_assert_eq!(storage.note_count(), 1);
            Ok(())
        })?;
    }

    #[test]
    fn prop_non_empty_description_is_accepted(
        title in arb_valid_title(),
        description in "[ \t\n]{1,8}|[ a-z]{1,32}",
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let storage = MockStorage::new();
            let app = test_app(&storage);
            let payload = json!({"title": title, "description": description}).to_string();

            let response = send(&app, Method::POST, "/notes", Some(&payload)).await;
            prop_assert_eq!(response.status, StatusCode::CREATED);
            prop_assert_eq!(&response.json()["description"], &json!(description));
            prop_assert_eq!(storage.note_count(), 1);
            Ok(())
        })?;
    }

    #[test]
    fn prop_non_numeric_ids_are_bad_request(raw in "[a-zA-Z_]{1,12}") {
        let rt = test_runtime()?;
        rt.block_on(async {
            let app = test_app(&MockStorage::new());
            let response = send(&app, Method::GET, &format!("/notes/{}", raw), None).await;
            prop_assert_eq!(response.status, StatusCode::BAD_REQUEST);
            Ok(())
        })?;
    }
}
