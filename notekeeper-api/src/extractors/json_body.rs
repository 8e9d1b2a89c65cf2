//! JSON body extractor that ignores `Content-Type`.
//!
//! axum's `Json` rejects requests without `application/json`. Clients of
//! this service do not always send one, so the body is decoded as JSON
//! unconditionally and every failure becomes `InvalidJson` (400).

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use super::note_operation;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let op = note_operation(req.method());
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(op, error = %e, "Failed to read request body");
            ApiError::invalid_json()
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::warn!(op, error = %e, "Bad JSON data");
            ApiError::invalid_json()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreateNoteRequest;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use tower::ServiceExt;

    async fn echo(JsonBody(req): JsonBody<CreateNoteRequest>) -> String {
        req.title
    }

    async fn post_body(body: &'static str, content_type: Option<&str>) -> StatusCode {
        let app = Router::new().route("/", post(echo));
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let response = app
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_decodes_without_content_type() {
        let status = post_body(r#"{"title":"A","description":"B"}"#, None).await;
        assert_eq!(status, StatusCode::OK);
        let status = post_body(r#"{"title":"A","description":"B"}"#, Some("text/plain")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_decode_failures_are_bad_request() {
        for body in ["", "{", "[]", r#"{"title":"A"}"#, r#"{"title":1,"description":"B"}"#] {
            assert_eq!(
                post_body(body, Some("application/json")).await,
                StatusCode::BAD_REQUEST,
                "{}",
                body
            );
        }
    }
}
