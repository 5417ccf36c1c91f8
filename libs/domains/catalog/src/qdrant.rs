use async_trait::async_trait;
use qdrant_client::qdrant::{
    self, CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use core_config::{env_or_default, ConfigError, FromEnv};

use crate::embedding::EMBEDDING_DIM;
use crate::error::{CatalogError, CatalogResult};
use crate::index::{ScoredId, ToolIndex};

/// Name of the Qdrant collection holding tool embeddings
pub const COLLECTION_NAME: &str = "tools";

/// Qdrant connection settings
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub host: String,
    pub port: u16,
}

impl QdrantConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6334,
        }
    }
}

impl FromEnv for QdrantConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or_default("QDRANT_HOST", &defaults.host),
            port: env_or_default("QDRANT_PORT", &defaults.port.to_string())
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: "QDRANT_PORT".to_string(),
                    details: format!("{}", e),
                })?,
        })
    }
}

/// Qdrant-backed implementation of [`ToolIndex`].
///
/// Uses the gRPC port (6334 by default). Writes wait for the operation to
/// land so a search issued right after an insert sees the new point.
pub struct QdrantToolIndex {
    client: Qdrant,
}

impl QdrantToolIndex {
    pub fn connect(config: &QdrantConfig) -> CatalogResult<Self> {
        let client = Qdrant::from_url(&config.url())
            .build()
            .map_err(|e| CatalogError::VectorIndex(format!("Failed to build client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn uuid_to_point_id(id: Uuid) -> PointId {
        PointId::from(id.to_string())
    }

    fn point_id_to_uuid(point_id: &PointId) -> CatalogResult<Uuid> {
        match &point_id.point_id_options {
            Some(qdrant::point_id::PointIdOptions::Uuid(uuid_str)) => Uuid::parse_str(uuid_str)
                .map_err(|e| CatalogError::VectorIndex(format!("Invalid point UUID: {}", e))),
            Some(qdrant::point_id::PointIdOptions::Num(num)) => Ok(Uuid::from_u128(*num as u128)),
            None => Err(CatalogError::VectorIndex("Missing point ID".to_string())),
        }
    }
}

#[async_trait]
impl ToolIndex for QdrantToolIndex {
    async fn ensure_collection(&self) -> CatalogResult<()> {
        // Probe failures are treated as "collection missing"; creating an
        // existing collection is the error we would surface anyway.
        if self.client.collection_info(COLLECTION_NAME).await.is_ok() {
            return Ok(());
        }

        tracing::info!(collection = COLLECTION_NAME, "creating Qdrant collection");

        self.client
            .create_collection(
                CreateCollectionBuilder::new(COLLECTION_NAME).vectors_config(
                    VectorParamsBuilder::new(EMBEDDING_DIM as u64, Distance::Cosine),
                ),
            )
            .await
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;

        Ok(())
    }

    async fn upsert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        payload: serde_json::Value,
    ) -> CatalogResult<()> {
        let payload = Payload::try_from(payload)
            .map_err(|e| CatalogError::VectorIndex(format!("Invalid payload: {}", e)))?;

        let point = PointStruct::new(Self::uuid_to_point_id(id), vector, payload);

        self.client
            .upsert_points(UpsertPointsBuilder::new(COLLECTION_NAME, vec![point]).wait(true))
            .await
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(COLLECTION_NAME)
                    .points(vec![Self::uuid_to_point_id(id)])
                    .wait(true),
            )
            .await
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;

        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: u64) -> CatalogResult<Vec<ScoredId>> {
        let results = self
            .client
            .search_points(SearchPointsBuilder::new(COLLECTION_NAME, vector, limit))
            .await
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;

        results
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .map(Self::point_id_to_uuid)
                    .transpose()?
                    .ok_or_else(|| CatalogError::VectorIndex("Missing point ID".to_string()))?;

                Ok(ScoredId {
                    id,
                    score: point.score,
                })
            })
            .collect()
    }

    async fn probe(&self) -> CatalogResult<()> {
        self.client
            .health_check()
            .await
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars_unset(["QDRANT_HOST", "QDRANT_PORT"], || {
            let config = QdrantConfig::from_env().unwrap();
            assert_eq!(config.host, "localhost");
            assert_eq!(config.port, 6334);
            assert_eq!(config.url(), "http://localhost:6334");
        });
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("QDRANT_HOST", Some("qdrant.internal")),
                ("QDRANT_PORT", Some("7000")),
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url(), "http://qdrant.internal:7000");
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_port() {
        temp_env::with_var("QDRANT_PORT", Some("not-a-port"), || {
            assert!(QdrantConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_point_id_roundtrip() {
        let id = Uuid::now_v7();
        let point_id = QdrantToolIndex::uuid_to_point_id(id);
        let back = QdrantToolIndex::point_id_to_uuid(&point_id).unwrap();
        assert_eq!(back, id);
    }
}
