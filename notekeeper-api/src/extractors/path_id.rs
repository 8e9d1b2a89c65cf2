//! Path extractor for typed note ids.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use notekeeper_core::ValidationError;
use std::str::FromStr;

use super::note_operation;
use crate::error::ApiError;

/// Extracts the single `:id` path parameter and parses it into `T`.
///
/// Any failure, whether the segment is missing or does not parse, is an
/// `InvalidId` (400) rejection.
///
/// ```rust,ignore
/// async fn get_note(PathId(id): PathId<NoteId>) -> ApiResult<Json<NoteResponse>> {
///     // id is a positive NoteId
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathId<T>
where
    S: Send + Sync,
    T: FromStr<Err = ValidationError>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let op = note_operation(&parts.method);
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(op, path = %parts.uri.path(), error = %e, "Missing path id");
                ApiError::invalid_id()
            })?;

        raw.parse::<T>().map(PathId).map_err(|e| {
            tracing::warn!(op, error = %e, "Rejected path id");
            ApiError::from(e)
        })
    }
}
