//! Note-related API types

use notekeeper_core::{Note, NoteDraft, NoteId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Request to create a new note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    /// Title of the note, 1 to 20 characters
    pub title: String,
    /// Body of the note, must not be empty
    pub description: String,
}

/// Request to replace an existing note. The id comes from the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateNoteRequest {
    /// New title, 1 to 20 characters
    pub title: String,
    /// New body, must not be empty
    pub description: String,
}

impl CreateNoteRequest {
    pub fn into_draft(self) -> Result<NoteDraft, ValidationError> {
        NoteDraft::new(self.title, self.description)
    }
}

impl UpdateNoteRequest {
    pub fn into_draft(self) -> Result<NoteDraft, ValidationError> {
        NoteDraft::new(self.title, self.description)
    }
}

/// Note as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteResponse {
    /// Store-assigned identifier
    #[schema(value_type = i64)]
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// When the note was created (UTC)
    #[schema(value_type = String, format = DateTime)]
    pub created: Timestamp,
    /// When the note was last updated (UTC); absent until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub changed: Option<Timestamp>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            description: note.description,
            created: note.created,
            changed: note.changed,
        }
    }
}
