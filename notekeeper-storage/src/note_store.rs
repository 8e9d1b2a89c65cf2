//! Async storage trait for the notes relation.

use async_trait::async_trait;
use notekeeper_core::{Note, NoteDraft, NoteId, StorageResult};

/// Async storage contract for notes.
///
/// Every operation touches at most one row. Implementations report a
/// missing row as `StorageError::NotFound` and every other failure as one
/// of the remaining `StorageError` variants.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Create the notes relation if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> StorageResult<()>;

    /// Cheap connectivity probe.
    async fn health_check(&self) -> StorageResult<()>;

    // ========================================================================
    // NOTE OPERATIONS
    // ========================================================================

    /// All stored notes. Callers must not rely on ordering.
    async fn note_list(&self) -> StorageResult<Vec<Note>>;

    /// Get a note by ID.
    async fn note_get(&self, id: NoteId) -> StorageResult<Note>;

    /// Insert a note; the store assigns `id` and `created`.
    async fn note_insert(&self, draft: &NoteDraft) -> StorageResult<Note>;

    /// Overwrite title and description and refresh `changed`.
    async fn note_update(&self, id: NoteId, draft: &NoteDraft) -> StorageResult<Note>;

    /// Hard delete.
    async fn note_delete(&self, id: NoteId) -> StorageResult<()>;
}
