//! NOTEKEEPER Storage
//!
//! The `NoteStore` contract shared by every backend, plus an in-memory
//! `MockStorage` used by tests and local runs.

pub mod mock;
pub mod note_store;

pub use mock::MockStorage;
pub use note_store::NoteStore;
