//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// App-level OpenAPI document; the catalog domain's paths are merged in
/// at startup.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tool Catalog API",
        version = "0.1.0",
        description = "Tool catalog with semantic search over embeddings"
    ),
    paths(crate::api::root::root, crate::api::health::health),
    tags(
        (name = "service", description = "Service metadata and health")
    )
)]
pub struct ApiDoc;
