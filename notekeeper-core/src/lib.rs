//! NOTEKEEPER Core - Domain Types
//!
//! Pure data structures and validation rules shared by the storage
//! and API crates. Nothing here knows about HTTP or SQL.

pub mod entities;
pub mod error;
pub mod identity;

pub use entities::{
    validate_description, validate_title, Note, NoteDraft, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
pub use error::{ConfigError, StorageError, StorageResult, ValidationError};
pub use identity::{NoteId, Timestamp};
