//! Handler tests for the catalog domain
//!
//! These run the full handler → service → repository/index path against
//! in-memory implementations, with a small deterministic embedder standing
//! in for the ONNX model. They verify routing, status codes, JSON shapes,
//! and the search/history flow.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

const TEST_DIM: usize = 384;

/// Deterministic bag-of-words embedder.
///
/// Each lowercase token is hashed (FNV-1a) into one of the dimensions, the
/// vector is L2-normalized. Texts sharing words land close together, which
/// is all the ranking assertions below need.
struct HashEmbedder;

fn fnv1a(token: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in token.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> CatalogResult<Vec<f32>> {
        let mut vector = vec![0.0f32; TEST_DIM];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            vector[(fnv1a(token) % TEST_DIM as u64) as usize] += 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        TEST_DIM
    }
}

fn test_app() -> axum::Router {
    let service = CatalogService::new(
        InMemoryToolRepository::new(),
        Arc::new(InMemoryToolIndex::new()),
        Arc::new(HashEmbedder),
    );
    handlers::router(service)
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_tool(app: &axum::Router, body: serde_json::Value) -> Tool {
    let response = app
        .clone()
        .oneshot(post_json("/tools", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_tool_returns_201_with_full_record() {
    let app = test_app();

    let tool = create_tool(
        &app,
        json!({
            "name": "numpy",
            "description": "Numerical computing with arrays",
            "tags": ["python", "math"],
            "metadata": {"homepage": "https://numpy.org"}
        }),
    )
    .await;

    assert_eq!(tool.name, "numpy");
    assert_eq!(tool.tags, vec!["python", "math"]);
    assert_eq!(tool.metadata["homepage"], json!("https://numpy.org"));
    assert_eq!(tool.created_at, tool.updated_at);
}

#[tokio::test]
async fn test_create_tool_defaults_tags_and_metadata() {
    let app = test_app();

    let tool = create_tool(
        &app,
        json!({"name": "ripgrep", "description": "Fast recursive grep"}),
    )
    .await;

    assert!(tool.tags.is_empty());
    assert!(tool.metadata.is_empty());
}

#[tokio::test]
async fn test_create_tool_rejects_empty_name() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/tools",
            json!({"name": "", "description": "no name"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tools_route_accepts_trailing_slash() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/tools/",
            json!({"name": "jq", "description": "JSON processor"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_get_tool_roundtrip_and_404() {
    let app = test_app();

    let created = create_tool(
        &app,
        json!({"name": "pandas", "description": "Dataframes for Python"}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get(&format!("/tools/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Tool = json_body(response.into_body()).await;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "pandas");

    let response = app
        .oneshot(get(&format!("/tools/{}", uuid::Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_tool_rejects_malformed_uuid() {
    let app = test_app();

    let response = app.oneshot(get("/tools/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_tools_pagination_window() {
    let app = test_app();

    for name in ["a", "b", "c", "d", "e"] {
        create_tool(&app, json!({"name": name, "description": "tool"})).await;
    }

    let response = app
        .clone()
        .oneshot(get("/tools?skip=1&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: Vec<Tool> = json_body(response.into_body()).await;
    let names: Vec<_> = page.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);

    let response = app.oneshot(get("/tools?skip=100&limit=10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: Vec<Tool> = json_body(response.into_body()).await;
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_update_tool_partial_keeps_other_fields() {
    let app = test_app();

    let created = create_tool(
        &app,
        json!({
            "name": "polars",
            "description": "Fast dataframes",
            "tags": ["rust"]
        }),
    )
    .await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tools/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"tags": ["rust", "python"]})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Tool = json_body(response.into_body()).await;
    assert_eq!(updated.name, "polars");
    assert_eq!(updated.description, "Fast dataframes");
    assert_eq!(updated.tags, vec!["rust", "python"]);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_missing_tool_returns_404() {
    let app = test_app();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tools/{}", uuid::Uuid::now_v7()))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"name": "ghost"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_tool_confirms_then_404s() {
    let app = test_app();

    let created = create_tool(&app, json!({"name": "fd", "description": "File finder"})).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tools/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation: DeleteResponse = json_body(response.into_body()).await;
    assert_eq!(confirmation.id, created.id);
    assert_eq!(confirmation.message, "Tool deleted successfully");

    let response = app
        .oneshot(get(&format!("/tools/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_tool_returns_404() {
    let app = test_app();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tools/{}", uuid::Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_ranks_relevant_tool_first_and_logs_history() {
    let app = test_app();

    let numpy = create_tool(
        &app,
        json!({
            "name": "numpy",
            "description": "Numerical computing with arrays and matrices",
            "tags": ["python", "math"]
        }),
    )
    .await;
    create_tool(
        &app,
        json!({
            "name": "ripgrep",
            "description": "Recursively search directories for a regex pattern",
            "tags": ["cli", "search"]
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/tools/search",
            json!({"query": "numerical arrays matrices", "limit": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let hits: Vec<SearchHit> = json_body(response.into_body()).await;
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].tool.id, numpy.id);
    assert!(hits[0].score > hits[1].score);

    let response = app.oneshot(get("/search/history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history: Vec<SearchHistoryEntry> = json_body(response.into_body()).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "numerical arrays matrices");
    assert_eq!(history[0].results.len(), 2);
    assert_eq!(history[0].results[0].id, numpy.id);
}

#[tokio::test]
async fn test_search_limit_bounds_are_enforced() {
    let app = test_app();

    for limit in [0, 51] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/tools/search",
                json!({"query": "anything", "limit": limit}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_search_rejects_empty_query() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/tools/search", json!({"query": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_empty_catalog_returns_empty_and_still_logs() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/tools/search", json!({"query": "anything"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let hits: Vec<SearchHit> = json_body(response.into_body()).await;
    assert!(hits.is_empty());

    let response = app.oneshot(get("/search/history")).await.unwrap();
    let history: Vec<SearchHistoryEntry> = json_body(response.into_body()).await;
    assert_eq!(history.len(), 1);
    assert!(history[0].results.is_empty());
}

#[tokio::test]
async fn test_history_is_newest_first_and_respects_limit() {
    let app = test_app();

    for query in ["first", "second", "third"] {
        let response = app
            .clone()
            .oneshot(post_json("/tools/search", json!({"query": query})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get("/search/history?limit=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let history: Vec<SearchHistoryEntry> = json_body(response.into_body()).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].query, "third");
    assert_eq!(history[1].query, "second");
}

#[tokio::test]
async fn test_search_drops_hits_whose_row_is_gone() {
    // Build the service by hand so the index can be poisoned with a point
    // whose database row never existed.
    let index = Arc::new(InMemoryToolIndex::new());
    let embedder: Arc<dyn Embedder> = Arc::new(HashEmbedder);

    let orphan_id = uuid::Uuid::now_v7();
    let vector = embedder.embed("orphaned point").unwrap();
    index
        .upsert(orphan_id, vector, json!({}))
        .await
        .unwrap();

    let service = CatalogService::new(InMemoryToolRepository::new(), index, embedder);
    let app = handlers::router(service);

    let response = app
        .oneshot(post_json(
            "/tools/search",
            json!({"query": "orphaned point"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let hits: Vec<SearchHit> = json_body(response.into_body()).await;
    assert!(hits.is_empty());
}
