//! Note REST API Routes
//!
//! Each handler parses the id (item routes), decodes and validates the
//! body (create/update), calls the store once, and maps the result.
//! Status translation lives in `crate::error`.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json, Router,
};
use notekeeper_core::NoteId;
use notekeeper_storage::NoteStore;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extractors::{note_operation, JsonBody, PathId},
    types::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for note routes.
#[derive(Clone)]
pub struct NoteState {
    pub store: Arc<dyn NoteStore>,
}

impl NoteState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /notes - List all notes
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    responses(
        (status = 200, description = "All notes", body = Vec<NoteResponse>),
        (status = 500, description = "Storage failure", body = ApiError),
    ),
)]
#[tracing::instrument(skip_all, fields(op = "note_list"))]
pub async fn list_notes(State(state): State<Arc<NoteState>>) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = state.store.note_list().await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// GET /notes/{id} - Get note by ID
#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "Notes",
    params(
        ("id" = i64, Path, description = "Note ID (positive integer)")
    ),
    responses(
        (status = 200, description = "Note details", body = NoteResponse),
        (status = 400, description = "Invalid ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError),
    ),
)]
#[tracing::instrument(skip_all, fields(op = "note_get", note_id = %id))]
pub async fn get_note(
    State(state): State<Arc<NoteState>>,
    PathId(id): PathId<NoteId>,
) -> ApiResult<Json<NoteResponse>> {
    let note = state.store.note_get(id).await.map_err(log_not_found)?;
    Ok(Json(note.into()))
}

/// POST /notes - Create a new note
#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Bad JSON or invalid fields", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError),
    ),
)]
#[tracing::instrument(skip_all, fields(op = "note_insert"))]
pub async fn create_note(
    State(state): State<Arc<NoteState>>,
    JsonBody(req): JsonBody<CreateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    let (title_len, description_len) = (req.title.chars().count(), req.description.len());
    let draft = req.into_draft().map_err(|e| {
        tracing::warn!(title_len, description_len, error = %e, "Rejected note payload");
        ApiError::from(e)
    })?;

    let note = state.store.note_insert(&draft).await?;
    tracing::info!(note_id = %note.id, "Note created");

    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

/// PUT /notes/{id} - Replace a note's title and description
#[utoipa::path(
    put,
    path = "/notes/{id}",
    tag = "Notes",
    params(
        ("id" = i64, Path, description = "Note ID (positive integer)")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = NoteResponse),
        (status = 400, description = "Invalid ID, bad JSON or invalid fields", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError),
    ),
)]
#[tracing::instrument(skip_all, fields(op = "note_update", note_id = %id))]
pub async fn update_note(
    State(state): State<Arc<NoteState>>,
    PathId(id): PathId<NoteId>,
    JsonBody(req): JsonBody<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let (title_len, description_len) = (req.title.chars().count(), req.description.len());
    let draft = req.into_draft().map_err(|e| {
        tracing::warn!(title_len, description_len, error = %e, "Rejected note payload");
        ApiError::from(e)
    })?;

    let note = state
        .store
        .note_update(id, &draft)
        .await
        .map_err(log_not_found)?;
    tracing::info!("Note updated");

    Ok(Json(note.into()))
}

/// DELETE /notes/{id} - Delete note
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "Notes",
    params(
        ("id" = i64, Path, description = "Note ID (positive integer)")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 400, description = "Invalid ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError),
    ),
)]
#[tracing::instrument(skip_all, fields(op = "note_delete", note_id = %id))]
pub async fn delete_note(
    State(state): State<Arc<NoteState>>,
    PathId(id): PathId<NoteId>,
) -> ApiResult<StatusCode> {
    state.store.note_delete(id).await.map_err(log_not_found)?;
    tracing::info!("Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET/PUT/DELETE on `/notes/` or `/notes/{id}/...`: the id segment is
/// missing or followed by extra segments.
pub async fn reject_malformed_id(method: Method, uri: Uri) -> ApiError {
    tracing::warn!(op = note_operation(&method), path = %uri.path(), "Malformed note path");
    ApiError::invalid_id()
}

fn log_not_found(err: notekeeper_core::StorageError) -> ApiError {
    if matches!(err, notekeeper_core::StorageError::NotFound { .. }) {
        tracing::warn!("Note not found");
    }
    ApiError::from(err)
}

fn malformed_id_routes() -> MethodRouter<Arc<NoteState>> {
    get(reject_malformed_id)
        .put(reject_malformed_id)
        .delete(reject_malformed_id)
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the note routes router.
///
/// Unregistered methods on any of these paths get 405 with an `Allow`
/// header.
pub fn create_router(store: Arc<dyn NoteStore>) -> Router {
    let state = Arc::new(NoteState::new(store));

    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/notes/", malformed_id_routes())
        .route("/notes/:id/*rest", malformed_id_routes())
        .with_state(state)
}
