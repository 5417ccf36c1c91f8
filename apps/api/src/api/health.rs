use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use core_config::AppInfo;
use database::postgres::check_health;
use domain_catalog::ToolIndex;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

/// Shared handles for the app-level endpoints.
#[derive(Clone)]
pub struct HealthState {
    pub app: AppInfo,
    pub db: DatabaseConnection,
    pub index: Arc<dyn ToolIndex>,
}

/// Health report for the service and its two stores.
///
/// Always answers 200; an unhealthy dependency is reported in the body so
/// that dashboards polling this endpoint see the cause, not a bare 5xx.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Health report, healthy or not")
    )
)]
pub async fn health(State(state): State<HealthState>) -> Json<Value> {
    if let Err(err) = check_health(&state.db).await {
        tracing::warn!(error = %err, "health check: database unreachable");
        return Json(unhealthy(err.to_string()));
    }

    if let Err(err) = state.index.probe().await {
        tracing::warn!(error = %err, "health check: vector index unreachable");
        return Json(unhealthy(err.to_string()));
    }

    Json(json!({
        "status": "healthy",
        "database": "connected",
        "vector_db": "connected",
        "timestamp": Utc::now(),
    }))
}

fn unhealthy(error: String) -> Value {
    json!({
        "status": "unhealthy",
        "error": error,
        "timestamp": Utc::now(),
    })
}
