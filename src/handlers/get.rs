use crate::error::{ApiError, ErrorResponse};
use crate::models::{GetHashFieldResponse, GetHashResponse, GetStringResponse, ValueType};
use crate::state::AppState;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET /{key} - Read a string value, a single hash field, or a whole hash
///
/// `?type=hash&field=f` reads one field, `?type=hash` reads the whole
/// hash, anything else reads the key as a string. An empty string value
/// is present and returned with 200; only store-level absence is 404.
#[utoipa::path(
    get,
    path = "/{key}",
    params(
        ("key" = String, Path, description = "Store key (the full request path minus the leading slash)"),
        ("type" = Option<String>, Query, description = "Value family: 'hash' or anything else for string"),
        ("field" = Option<String>, Query, description = "Hash field to read; omit to read the whole hash")
    ),
    responses(
        (status = 200, description = "Value found", body = GetStringResponse),
        (status = 400, description = "Empty key", body = ErrorResponse),
        (status = 404, description = "Key, field, or hash not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn get_value(
    state: &AppState,
    key: &str,
    value_type: ValueType,
    field: Option<&str>,
) -> Result<Response, ApiError> {
    if key.is_empty() {
        return Err(ApiError::KeyRequiredForGet);
    }

    match value_type {
        ValueType::Hash => match field {
            Some(field) => {
                match state.store.get_hash_field(key, field).await? {
                    Some(value) => {
                        tracing::info!("Read hash field {}.{}", key, field);
                        Ok((
                            StatusCode::OK,
                            Json(GetHashFieldResponse {
                                key: key.to_string(),
                                field: field.to_string(),
                                value,
                            }),
                        )
                            .into_response())
                    }
                    None => Err(ApiError::FieldNotFound {
                        key: key.to_string(),
                        field: field.to_string(),
                    }),
                }
            }
            None => {
                let hash = state.store.get_hash_all(key).await?;
                // An empty hash is indistinguishable from an absent one
                if hash.is_empty() {
                    return Err(ApiError::HashNotFound(key.to_string()));
                }
                tracing::info!("Read hash {} ({} fields)", key, hash.len());
                Ok((
                    StatusCode::OK,
                    Json(GetHashResponse {
                        key: key.to_string(),
                        hash,
                    }),
                )
                    .into_response())
            }
        },
        ValueType::String => match state.store.get_string(key).await? {
            Some(value) => {
                tracing::info!("Read string key {}", key);
                Ok((
                    StatusCode::OK,
                    Json(GetStringResponse {
                        key: key.to_string(),
                        value,
                    }),
                )
                    .into_response())
            }
            None => Err(ApiError::KeyNotFound(key.to_string())),
        },
    }
}
