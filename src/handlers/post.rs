use crate::error::{ApiError, ErrorResponse};
use crate::models::{
    PostBody, SetHashFieldResponse, SetHashFieldsResponse, SetStringResponse, ValueType,
};
use crate::state::AppState;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// POST /{key} - Write a string value, a single hash field, or several hash fields
///
/// String writes replace the whole value; hash writes upsert fields
/// without touching the rest of the hash. The bulk `fields` shape wins
/// over `field`/`value` when both are present.
///
/// A body that fails to parse surfaces as a 500, not a 400. That
/// mirrors the original service, where the parse happened inside the
/// catch-all; callers depend on the status quo. Same for the empty
/// string: POST rejects it as a missing value even though GET will
/// happily return one that reached the store some other way.
#[utoipa::path(
    post,
    path = "/{key}",
    params(
        ("key" = String, Path, description = "Store key (the full request path minus the leading slash)"),
        ("type" = Option<String>, Query, description = "Value family: 'hash' or anything else for string")
    ),
    request_body = PostBody,
    responses(
        (status = 200, description = "Value written", body = SetStringResponse),
        (status = 400, description = "Missing body, value, or hash field shape", body = ErrorResponse),
        (status = 500, description = "Store error or unparseable body", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn set_value(
    state: &AppState,
    key: &str,
    value_type: ValueType,
    body: &[u8],
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BodyRequired);
    }

    let body: PostBody = serde_json::from_slice(body)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("Failed to parse request body")))?;

    match value_type {
        ValueType::Hash => {
            if let Some(fields) = body.fields {
                state.store.set_hash_fields(key, &fields).await?;
                tracing::info!("Set {} hash fields on {}", fields.len(), key);
                Ok((
                    StatusCode::OK,
                    Json(SetHashFieldsResponse {
                        message: "Hash fields set successfully".to_string(),
                        key: key.to_string(),
                        fields,
                    }),
                )
                    .into_response())
            } else if let (Some(field), Some(value)) =
                (body.field.filter(|f| !f.is_empty()), body.value)
            {
                // An empty string is a valid hash field value
                state.store.set_hash_field(key, &field, &value).await?;
                tracing::info!("Set hash field {}.{}", key, field);
                Ok((
                    StatusCode::OK,
                    Json(SetHashFieldResponse {
                        message: "Hash field set successfully".to_string(),
                        key: key.to_string(),
                        field,
                        value,
                    }),
                )
                    .into_response())
            } else {
                Err(ApiError::HashBodyInvalid)
            }
        }
        ValueType::String => match body.value.filter(|v| !v.is_empty()) {
            Some(value) => {
                state.store.set_string(key, &value).await?;
                tracing::info!("Set string key {}", key);
                Ok((
                    StatusCode::OK,
                    Json(SetStringResponse {
                        message: "Value set successfully".to_string(),
                        key: key.to_string(),
                        value,
                    }),
                )
                    .into_response())
            }
            None => Err(ApiError::ValueRequired),
        },
    }
}
