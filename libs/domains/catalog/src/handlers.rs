use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::index::ToolIndex;
use crate::models::{
    CreateTool, DeleteResponse, HistoryQuery, ListQuery, SearchHistoryEntry, SearchHit,
    SearchRequest, SearchResultSummary, Tool, UpdateTool,
};
use crate::repository::ToolRepository;
use crate::service::CatalogService;

const TOOLS_TAG: &str = "tools";
const SEARCH_TAG: &str = "search";

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_tool,
        list_tools,
        get_tool,
        update_tool,
        delete_tool,
        search_tools,
        search_history,
    ),
    components(schemas(
        Tool,
        CreateTool,
        UpdateTool,
        SearchRequest,
        SearchHit,
        SearchResultSummary,
        SearchHistoryEntry,
        DeleteResponse,
        ErrorResponse
    )),
    tags(
        (name = TOOLS_TAG, description = "Tool catalog CRUD endpoints"),
        (name = SEARCH_TAG, description = "Semantic search endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints.
///
/// `/tools` is registered with and without the trailing slash; clients of
/// the original service used both forms.
pub fn router<R: ToolRepository, I: ToolIndex>(service: CatalogService<R, I>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/tools", post(create_tool).get(list_tools))
        .route("/tools/", post(create_tool).get(list_tools))
        .route("/tools/search", post(search_tools))
        .route(
            "/tools/{id}",
            get(get_tool).put(update_tool).delete(delete_tool),
        )
        .route("/search/history", get(search_history))
        .with_state(shared_service)
}

/// Register a new tool and index its embedding
#[utoipa::path(
    post,
    path = "/tools",
    tag = TOOLS_TAG,
    request_body = CreateTool,
    responses(
        (status = 201, description = "Tool created and indexed", body = Tool),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Storage or index failure", body = ErrorResponse)
    )
)]
async fn create_tool<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    ValidatedJson(input): ValidatedJson<CreateTool>,
) -> CatalogResult<impl IntoResponse> {
    let tool = service.insert_tool(input).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

/// List tools in insertion order
#[utoipa::path(
    get,
    path = "/tools",
    tag = TOOLS_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Page of tools", body = Vec<Tool>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_tools<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    Query(query): Query<ListQuery>,
) -> CatalogResult<Json<Vec<Tool>>> {
    let tools = service.list_tools(query.skip, query.limit).await?;
    Ok(Json(tools))
}

/// Get a tool by ID
#[utoipa::path(
    get,
    path = "/tools/{id}",
    tag = TOOLS_TAG,
    params(
        ("id" = Uuid, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool found", body = Tool),
        (status = 400, description = "Malformed UUID", body = ErrorResponse),
        (status = 404, description = "No such tool", body = ErrorResponse)
    )
)]
async fn get_tool<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Tool>> {
    let tool = service.get_tool(id).await?;
    Ok(Json(tool))
}

/// Update a tool and refresh its embedding
#[utoipa::path(
    put,
    path = "/tools/{id}",
    tag = TOOLS_TAG,
    params(
        ("id" = Uuid, Path, description = "Tool ID")
    ),
    request_body = UpdateTool,
    responses(
        (status = 200, description = "Tool updated and reindexed", body = Tool),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "No such tool", body = ErrorResponse),
        (status = 500, description = "Storage or index failure", body = ErrorResponse)
    )
)]
async fn update_tool<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateTool>,
) -> CatalogResult<Json<Tool>> {
    let tool = service.update_tool(id, input).await?;
    Ok(Json(tool))
}

/// Delete a tool and its index point
#[utoipa::path(
    delete,
    path = "/tools/{id}",
    tag = TOOLS_TAG,
    params(
        ("id" = Uuid, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool deleted", body = DeleteResponse),
        (status = 400, description = "Malformed UUID", body = ErrorResponse),
        (status = 404, description = "No such tool", body = ErrorResponse),
        (status = 500, description = "Storage or index failure", body = ErrorResponse)
    )
)]
async fn delete_tool<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<DeleteResponse>> {
    let response = service.delete_tool(id).await?;
    Ok(Json(response))
}

/// Semantic search over the catalog
#[utoipa::path(
    post,
    path = "/tools/search",
    tag = SEARCH_TAG,
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Ranked hits, best first", body = Vec<SearchHit>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Index or embedding failure", body = ErrorResponse)
    )
)]
async fn search_tools<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    ValidatedJson(request): ValidatedJson<SearchRequest>,
) -> CatalogResult<Json<Vec<SearchHit>>> {
    let hits = service.search_tools(request).await?;
    Ok(Json(hits))
}

/// Recent searches, newest first
#[utoipa::path(
    get,
    path = "/search/history",
    tag = SEARCH_TAG,
    params(HistoryQuery),
    responses(
        (status = 200, description = "Logged searches", body = Vec<SearchHistoryEntry>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn search_history<R: ToolRepository, I: ToolIndex>(
    State(service): State<Arc<CatalogService<R, I>>>,
    Query(query): Query<HistoryQuery>,
) -> CatalogResult<Json<Vec<SearchHistoryEntry>>> {
    let history = service.search_history(query.limit).await?;
    Ok(Json(history))
}
