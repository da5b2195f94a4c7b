use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value family selected by the `type` query parameter.
///
/// Anything other than `hash` (case-insensitive) falls back to string
/// semantics without an error; clients relying on the default send no
/// `type` parameter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Hash,
}

impl ValueType {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("hash") => ValueType::Hash,
            _ => ValueType::String,
        }
    }
}

/// Query parameters accepted on every key route
#[derive(Deserialize, utoipa::ToSchema)]
pub struct KeyQuery {
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub field: Option<String>,
}

/// POST request body
///
/// String writes use `value`; hash writes use either `field` + `value`
/// or the bulk `fields` object. A body that parses as JSON but does not
/// fit this shape is treated as a parse failure.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PostBody {
    pub value: Option<String>,
    pub field: Option<String>,
    pub fields: Option<HashMap<String, String>>,
}

/// Response type for GET on a string key
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct GetStringResponse {
    pub key: String,
    pub value: String,
}

/// Response type for GET on a single hash field
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct GetHashFieldResponse {
    pub key: String,
    pub field: String,
    pub value: String,
}

/// Response type for GET on a whole hash
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct GetHashResponse {
    pub key: String,
    pub hash: HashMap<String, String>,
}

/// Response type for a string write
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetStringResponse {
    pub message: String,
    pub key: String,
    pub value: String,
}

/// Response type for a single hash field write
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetHashFieldResponse {
    pub message: String,
    pub key: String,
    pub field: String,
    pub value: String,
}

/// Response type for a bulk hash write
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetHashFieldsResponse {
    pub message: String,
    pub key: String,
    pub fields: HashMap<String, String>,
}

/// Response type for deleting a string key
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteKeyResponse {
    pub message: String,
    pub key: String,
}

/// Response type for deleting a hash field
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteHashFieldResponse {
    pub message: String,
    pub key: String,
    pub field: String,
}

/// Response type for the OPTIONS preflight acknowledgement
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PreflightResponse {
    pub message: String,
}
