//! NOTEKEEPER Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest strategies for valid and invalid note fields
//! - Fixtures for drafts and pre-populated stores

// Re-export mock storage from its source crate
pub use notekeeper_storage::{MockStorage, NoteStore};

// Re-export core types for convenience
pub use notekeeper_core::{
    Note, NoteDraft, NoteId, StorageError, Timestamp, ValidationError, TITLE_MAX_CHARS,
    TITLE_MIN_CHARS,
};

use proptest::prelude::*;

// ============================================================================
// GENERATORS
// ============================================================================

/// Titles between 1 and 20 characters, including multi-byte ones.
pub fn arb_valid_title() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 ]{1,20}",
        "[a-zé]{1,20}",
        Just("N".to_string()),
        Just("x".repeat(TITLE_MAX_CHARS)),
    ]
}

/// Titles that are empty or longer than 20 characters.
pub fn arb_invalid_title() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("x".repeat(TITLE_MAX_CHARS + 1)),
        "[a-z]{21,60}",
    ]
}

/// Non-empty descriptions.
pub fn arb_valid_description() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z ]{0,60}",
        "[a-z]{1,10}( [a-z]{1,10}){0,8}",
        Just(r#"{"key": "value"}"#.to_string()),
    ]
}


// ============================================================================
// FIXTURES
// ============================================================================

/// Build a draft from literals known to be valid.
///
/// # Panics
/// Panics if the fields do not validate; only for use in tests.
pub fn draft(title: &str, description: &str) -> NoteDraft {
    match NoteDraft::new(title, description) {
        Ok(draft) => draft,
        Err(e) => panic!("invalid fixture draft ({:?}, {:?}): {}", title, description, e),
    }
}

/// A `MockStorage` pre-populated with `count` notes titled `note-1`,
/// `note-2`, ... Ids run from 1 to `count`.
pub async fn seeded_storage(count: usize) -> MockStorage {
    let storage = MockStorage::new();
    for i in 1..=count {
        let note = storage
            .note_insert(&draft(&format!("note-{}", i), "seeded"))
            .await;
        if let Err(e) = note {
            panic!("seeding mock storage failed: {}", e);
        }
    }
    storage
}
