use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response envelope
///
/// Client errors echo the offending `key`/`field` back; the internal
/// error carries the underlying failure in `details`.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            key: None,
            field: None,
            details: None,
        }
    }
}

/// Custom error type for API endpoints
///
/// Maps every failure the dispatch path can produce to an HTTP status
/// and a JSON error body. Handlers return this instead of building
/// error responses inline.
#[derive(Debug)]
pub enum ApiError {
    /// GET with an empty key
    KeyRequiredForGet,
    /// DELETE with an empty key
    KeyRequiredForDelete,
    /// POST with an empty body
    BodyRequired,
    /// POST string with a missing or empty value
    ValueRequired,
    /// POST hash body matching neither the single-field nor bulk shape
    HashBodyInvalid,
    /// Hash DELETE without a field query parameter
    FieldRequiredForHashDelete,
    /// String key absent from the store
    KeyNotFound(String),
    /// Hash field absent from the store
    FieldNotFound { key: String, field: String },
    /// Hash key absent or holding no fields
    HashNotFound(String),
    /// HTTP method other than GET/POST/DELETE/OPTIONS
    MethodNotAllowed,
    /// Store failure, unparseable request body, or any other unexpected error
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::KeyRequiredForGet => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Key is required for GET operation"),
            ),
            ApiError::KeyRequiredForDelete => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Key is required for DELETE operation"),
            ),
            ApiError::BodyRequired => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Request body is required"),
            ),
            ApiError::ValueRequired => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Value is required in request body for string type"),
            ),
            ApiError::HashBodyInvalid => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    "Either 'field' and 'value' or 'fields' object is required for hash type",
                ),
            ),
            ApiError::FieldRequiredForHashDelete => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Field is required for hash DELETE operation"),
            ),
            ApiError::KeyNotFound(key) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    key: Some(key),
                    ..ErrorResponse::new("Key not found")
                },
            ),
            ApiError::FieldNotFound { key, field } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    key: Some(key),
                    field: Some(field),
                    ..ErrorResponse::new("Field not found in hash")
                },
            ),
            ApiError::HashNotFound(key) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    key: Some(key),
                    ..ErrorResponse::new("Hash not found or empty")
                },
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new("Method not allowed"),
            ),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        details: Some(format!("{:#}", err)),
                        ..ErrorResponse::new("Internal server error")
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}
