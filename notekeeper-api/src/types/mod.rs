//! API request and response types.

pub mod note;

pub use note::{CreateNoteRequest, NoteResponse, UpdateNoteRequest};
