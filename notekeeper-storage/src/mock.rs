//! In-memory `NoteStore` for tests and local runs.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use notekeeper_core::{Note, NoteDraft, NoteId, StorageError, StorageResult, Timestamp};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::note_store::NoteStore;

/// In-memory mock storage.
///
/// Ids come from an atomic sequence starting at 1 and are never reused.
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MockStorage {
    notes: Arc<RwLock<BTreeMap<NoteId, Note>>>,
    next_id: Arc<AtomicI64>,
    offline: Arc<AtomicBool>,
}

impl Default for MockStorage {
    fn default() -> Self {
        Self {
            notes: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl MockStorage {
    /// Create a new mock storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored notes. The id sequence keeps counting.
    pub fn clear(&self) {
        self.notes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get count of stored notes.
    pub fn note_count(&self) -> usize {
        self.notes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Make every subsequent operation fail with a connection error,
    /// simulating an unreachable database.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StorageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Connection {
                reason: "mock storage is offline".to_string(),
            });
        }
        Ok(())
    }
}

/// Next `changed` stamp for a note: the current time, nudged forward when
/// the clock has not moved past the note's previous stamp.
fn next_stamp(note: &Note) -> Timestamp {
    let previous = note.changed.unwrap_or(note.created);
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl NoteStore for MockStorage {
    async fn ensure_schema(&self) -> StorageResult<()> {
        self.check_online()
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.check_online()
    }

    async fn note_list(&self) -> StorageResult<Vec<Note>> {
        self.check_online()?;
        let notes = self.notes.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(notes.values().cloned().collect())
    }

    async fn note_get(&self, id: NoteId) -> StorageResult<Note> {
        self.check_online()?;
        let notes = self.notes.read().map_err(|_| StorageError::LockPoisoned)?;
        notes.get(&id).cloned().ok_or(StorageError::NotFound { id })
    }

    async fn note_insert(&self, draft: &NoteDraft) -> StorageResult<Note> {
        self.check_online()?;
        let mut notes = self.notes.write().map_err(|_| StorageError::LockPoisoned)?;
        let id = NoteId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let note = Note {
            id,
            title: draft.title().to_string(),
            description: draft.description().to_string(),
            created: Utc::now(),
            changed: None,
        };
        notes.insert(id, note.clone());
        Ok(note)
    }

    async fn note_update(&self, id: NoteId, draft: &NoteDraft) -> StorageResult<Note> {
        self.check_online()?;
        let mut notes = self.notes.write().map_err(|_| StorageError::LockPoisoned)?;
        let note = notes.get_mut(&id).ok_or(StorageError::NotFound { id })?;
        note.title = draft.title().to_string();
        note.description = draft.description().to_string();
        note.changed = Some(next_stamp(note));
        Ok(note.clone())
    }

    async fn note_delete(&self, id: NoteId) -> StorageResult<()> {
        self.check_online()?;
        let mut notes = self.notes.write().map_err(|_| StorageError::LockPoisoned)?;
        notes
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound { id })
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_insert_then_get_round_trips(
            title in "[a-zA-Z0-9]{1,20}",
            description in "[a-z ]{0,40}[a-z]",
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let storage = MockStorage::new();
                let draft = NoteDraft::new(title.clone(), description.clone()).unwrap();
                let created = storage.note_insert(&draft).await.unwrap();
                let fetched = storage.note_get(created.id).await.unwrap();
                prop_assert_eq!(fetched.title, title);
                prop_assert_eq!(fetched.description, description);
                prop_assert!(fetched.changed.is_none());
                Ok(())
            })?;
        }
    }
}
