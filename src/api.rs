//! HTTP API server for the diagram store
//!
//! Endpoints:
//! - POST / - Store a new diagram, returns a fresh read/write token pair
//! - GET /:token - Fetch a diagram by read token
//! - PUT /:token/:write_token - Replace a diagram, gated by its write token
//! - GET /health - Health check

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use bytes::Bytes;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{authorize_write, WriteAccess};
use crate::storage::{BlobStore, ObjectMeta};
use crate::token;

/// Content type recorded on every stored diagram and echoed back on reads.
/// Fixed for every document regardless of payload content.
pub const DIAGRAM_CONTENT_TYPE: &str = "text/json";

/// Upper bound on diagram payloads
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

/// Token pair handed out when a diagram is created
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    /// Update capability; the server never reveals it again after this response
    #[serde(rename = "writeToken")]
    pub write_token: String,

    /// Public identifier used to fetch the diagram
    #[serde(rename = "readToken")]
    pub read_token: String,
}

/// Create the API router with all endpoints
///
/// No authentication layer: possession of a token is the entire access
/// model, so every route is public.
pub fn create_router(state: AppState) -> Router {
    // Browser editors are served from arbitrary origins
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/", post(create_diagram))
        .route("/health", get(|| async { "OK" }))
        .route("/:token", get(get_diagram))
        .route("/:token/:write_token", put(update_diagram))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Store a new diagram under freshly minted tokens
async fn create_diagram(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Bad Request".to_string()));
    }

    let (read_token, write_token) = token::fresh_pair();
    let meta = ObjectMeta {
        write_token: write_token.clone(),
        content_type: DIAGRAM_CONTENT_TYPE.to_string(),
    };

    state
        .store
        .put(&read_token, body, &meta)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to store new diagram");
            ApiError::InternalError("Storage backend error".to_string())
        })?;

    tracing::debug!(read_token = %read_token, "Created diagram");

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            write_token,
            read_token,
        }),
    ))
}

/// Fetch a diagram by its read token
async fn get_diagram(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let object = state.store.get(&token).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read diagram from store");
        ApiError::InternalError("Storage backend error".to_string())
    })?;

    let Some(object) = object else {
        tracing::debug!(token = %token, "Diagram not found");
        return Err(ApiError::NotFound("Not found".to_string()));
    };

    Ok((
        [(header::CONTENT_TYPE, object.meta.content_type)],
        object.payload,
    )
        .into_response())
}

/// Replace a diagram's payload after checking the presented write token
///
/// The metadata fetched during the check is written back verbatim, so an
/// overwrite can never shed the write token.
async fn update_diagram(
    State(state): State<AppState>,
    Path((token, write_token)): Path<(String, String)>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Bad Request".to_string()));
    }

    let access = authorize_write(state.store.as_ref(), &token, &write_token)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to read diagram metadata");
            ApiError::InternalError("Storage backend error".to_string())
        })?;

    let meta = match access {
        WriteAccess::NotFound => {
            tracing::debug!(token = %token, "Diagram not found");
            return Err(ApiError::NotFound("Not found".to_string()));
        }
        WriteAccess::Deny => {
            tracing::warn!(token = %token, "Update rejected: write token mismatch");
            return Err(ApiError::Forbidden("Write token not valid".to_string()));
        }
        WriteAccess::Allow(meta) => meta,
    };

    state.store.put(&token, body, &meta).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to overwrite diagram");
        ApiError::InternalError("Storage backend error".to_string())
    })?;

    tracing::debug!(token = %token, "Updated diagram");

    Ok("Updated")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The editor expects camelCase field names with writeToken first
    #[test]
    fn create_response_uses_wire_field_names() {
        let resp = CreateResponse {
            write_token: "w".to_string(),
            read_token: "r".to_string(),
        };

        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"writeToken":"w","readToken":"r"}"#);
    }

    #[test]
    fn errors_map_to_protocol_status_codes() {
        let cases = [
            (
                ApiError::BadRequest("Bad Request".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Forbidden("Write token not valid".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("Not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::InternalError("Storage backend error".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
