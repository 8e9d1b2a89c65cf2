//! Custom extractors that reject with `ApiError` bodies.
//!
//! Rejections happen before the handler's span is entered, so their logs
//! carry the operation name themselves.

pub mod json_body;
pub mod path_id;

pub use json_body::JsonBody;
pub use path_id::PathId;

use axum::http::Method;

/// Store operation a note request is routed to. Only meaningful for the
/// requests that reach an extractor: item routes and create.
pub(crate) fn note_operation(method: &Method) -> &'static str {
    match *method {
        Method::GET => "note_get",
        Method::POST => "note_insert",
        Method::PUT => "note_update",
        Method::DELETE => "note_delete",
        _ => "unrouted",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_operation_names() {
        assert_eq!(note_operation(&Method::GET), "note_get");
        assert_eq!(note_operation(&Method::PUT), "note_update");
        assert_eq!(note_operation(&Method::PATCH), "unrouted");
    }
}
