use crate::error::{ApiError, ErrorResponse};
use crate::models::{DeleteHashFieldResponse, DeleteKeyResponse, ValueType};
use crate::state::AppState;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// DELETE /{key} - Remove a string key or a single hash field
///
/// Hash deletes remove one field at a time and never the key itself;
/// when the last field goes, the store drops the empty hash on its own.
/// The store's affected count distinguishes a real delete from a no-op,
/// which maps to 404.
#[utoipa::path(
    delete,
    path = "/{key}",
    params(
        ("key" = String, Path, description = "Store key (the full request path minus the leading slash)"),
        ("type" = Option<String>, Query, description = "Value family: 'hash' or anything else for string"),
        ("field" = Option<String>, Query, description = "Hash field to delete; required for hash deletes")
    ),
    responses(
        (status = 200, description = "Deleted", body = DeleteKeyResponse),
        (status = 400, description = "Empty key or missing field", body = ErrorResponse),
        (status = 404, description = "Nothing to delete", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn delete_value(
    state: &AppState,
    key: &str,
    value_type: ValueType,
    field: Option<&str>,
) -> Result<Response, ApiError> {
    if key.is_empty() {
        return Err(ApiError::KeyRequiredForDelete);
    }

    match value_type {
        ValueType::Hash => {
            let Some(field) = field else {
                return Err(ApiError::FieldRequiredForHashDelete);
            };

            let deleted = state.store.delete_hash_field(key, field).await?;
            if deleted == 0 {
                return Err(ApiError::FieldNotFound {
                    key: key.to_string(),
                    field: field.to_string(),
                });
            }

            tracing::info!("Deleted hash field {}.{}", key, field);
            Ok((
                StatusCode::OK,
                Json(DeleteHashFieldResponse {
                    message: "Hash field deleted successfully".to_string(),
                    key: key.to_string(),
                    field: field.to_string(),
                }),
            )
                .into_response())
        }
        ValueType::String => {
            let deleted = state.store.delete_string(key).await?;
            if deleted == 0 {
                return Err(ApiError::KeyNotFound(key.to_string()));
            }

            tracing::info!("Deleted key {}", key);
            Ok((
                StatusCode::OK,
                Json(DeleteKeyResponse {
                    message: "Key deleted successfully".to_string(),
                    key: key.to_string(),
                }),
            )
                .into_response())
        }
    }
}
