//! OpenAPI Specification for NOTEKEEPER API

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::ProbeReport;
use crate::routes::{health, note};
use crate::types::{CreateNoteRequest, NoteResponse, UpdateNoteRequest};

/// OpenAPI document for the notes service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NOTEKEEPER API",
        version = "0.1.0",
        description = "CRUD service for short text notes backed by PostgreSQL",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    tags(
        (name = "Notes", description = "Create, read, update and delete notes"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        // === Note Routes ===
        note::list_notes,
        note::get_note,
        note::create_note,
        note::update_note,
        note::delete_note,

        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(
        schemas(
            CreateNoteRequest,
            UpdateNoteRequest,
            NoteResponse,
            ApiError,
            ErrorCode,
            ProbeReport,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let openapi = ApiDoc::openapi();
        assert_eq!(openapi.info.title, "NOTEKEEPER API");
        assert_eq!(openapi.info.version, "0.1.0");

        let paths = &openapi.paths.paths;
        for path in ["/notes", "/notes/{id}", "/health/ping", "/health/live", "/health/ready"] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_openapi_json_serialization() -> Result<(), String> {
        let json = ApiDoc::to_json().map_err(|e| format!("Failed to serialize OpenAPI: {}", e))?;
        serde_json::from_str::<serde_json::Value>(&json)
            .map_err(|e| format!("Generated JSON invalid: {}", e))?;
        assert!(json.contains("NoteResponse"));
        assert!(json.contains("INVALID_JSON"));
        Ok(())
    }
}
