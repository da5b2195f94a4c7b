pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::models::{KeyQuery, PreflightResponse, ValueType};
use crate::state::AppState;

/// Handler for the bare root path, where the key is empty.
pub async fn root(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<KeyQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    dispatch(state, method, String::new(), query, body).await
}

/// Handler for every other path; the wildcard capture is the key.
pub async fn keyed(
    State(state): State<AppState>,
    method: Method,
    Path(key): Path<String>,
    Query(query): Query<KeyQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    dispatch(state, method, key, query, body).await
}

/// Route a request to the operation family for its method.
///
/// OPTIONS is acknowledged before any key or store logic so preflights
/// succeed even on requests that would otherwise be invalid. The `type`
/// query parameter picks string or hash semantics; unrecognized values
/// fall back to string.
async fn dispatch(
    state: AppState,
    method: Method,
    key: String,
    query: KeyQuery,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok((
            StatusCode::OK,
            Json(PreflightResponse {
                message: "CORS preflight".to_string(),
            }),
        )
            .into_response());
    }

    let value_type = ValueType::from_query(query.value_type.as_deref());

    if method == Method::GET {
        get::get_value(&state, &key, value_type, query.field.as_deref()).await
    } else if method == Method::POST {
        post::set_value(&state, &key, value_type, &body).await
    } else if method == Method::DELETE {
        delete::delete_value(&state, &key, value_type, query.field.as_deref()).await
    } else {
        Err(ApiError::MethodNotAllowed)
    }
}

/// Attach the CORS headers to every response, error responses included.
pub async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    response
}
