use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{
    DeleteHashFieldResponse, DeleteKeyResponse, GetHashFieldResponse, GetHashResponse,
    GetStringResponse, PostBody, PreflightResponse, SetHashFieldResponse, SetHashFieldsResponse,
    SetStringResponse,
};

/// OpenAPI documentation
///
/// There is no docs route on the HTTP surface (every path is a live
/// key), so the description is generated for out-of-band publishing.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-redis-kv API",
        version = "1.0.0",
        description = "A REST front-end for Redis string and hash values"
    ),
    paths(
        handlers::get::get_value,
        handlers::post::set_value,
        handlers::delete::delete_value
    ),
    components(
        schemas(
            PostBody,
            GetStringResponse,
            GetHashFieldResponse,
            GetHashResponse,
            SetStringResponse,
            SetHashFieldResponse,
            SetHashFieldsResponse,
            DeleteKeyResponse,
            DeleteHashFieldResponse,
            PreflightResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "kv", description = "Key-value store operations")
    )
)]
pub struct ApiDoc;
