use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::HealthState;

/// Service metadata and endpoint map
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service metadata and endpoint map")
    )
)]
pub async fn root(State(state): State<HealthState>) -> Json<Value> {
    Json(json!({
        "name": state.app.name,
        "version": state.app.version,
        "docs": "/swagger-ui",
        "endpoints": {
            "create_tool": "POST /tools/",
            "list_tools": "GET /tools/",
            "get_tool": "GET /tools/{id}",
            "update_tool": "PUT /tools/{id}",
            "delete_tool": "DELETE /tools/{id}",
            "search_tools": "POST /tools/search",
            "search_history": "GET /search/history",
            "health": "GET /health"
        }
    }))
}
