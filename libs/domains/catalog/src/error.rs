use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Tool {0} not found")]
    NotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Embedding error: {0}")]
    Embedding(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AppError::NotFound(format!("Tool {} not found", id)),
            CatalogError::Validation(details) => AppError::BadRequest(details),
            CatalogError::Database(details) => {
                tracing::error!(error = %details, "database failure");
                AppError::InternalServerError("Database error".to_string())
            }
            CatalogError::VectorIndex(details) => {
                tracing::error!(error = %details, "vector index failure");
                AppError::InternalServerError("Vector index error".to_string())
            }
            CatalogError::Embedding(details) => {
                tracing::error!(error = %details, "embedding failure");
                AppError::InternalServerError("Embedding error".to_string())
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let id = Uuid::now_v7();
        let response = CatalogError::NotFound(id).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let response = CatalogError::Validation("query must not be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_infrastructure_errors_map_to_500() {
        for err in [
            CatalogError::Database("connection reset".to_string()),
            CatalogError::VectorIndex("collection missing".to_string()),
            CatalogError::Embedding("model not loaded".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
