use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// A point id with its similarity score, as returned by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredId {
    pub id: Uuid,
    pub score: f32,
}

/// Vector index boundary.
///
/// Points are keyed by the tool's uuid; payloads travel as JSON so the
/// index stays agnostic of the tool schema.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolIndex: Send + Sync + 'static {
    /// Create the backing collection if it does not exist yet.
    async fn ensure_collection(&self) -> CatalogResult<()>;

    async fn upsert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        payload: serde_json::Value,
    ) -> CatalogResult<()>;

    async fn delete(&self, id: Uuid) -> CatalogResult<()>;

    /// Nearest neighbours of `vector`, best first.
    async fn search(&self, vector: Vec<f32>, limit: u64) -> CatalogResult<Vec<ScoredId>>;

    /// Cheap liveness check against the backing store.
    async fn probe(&self) -> CatalogResult<()>;
}

/// In-memory index doing brute-force cosine similarity. Test double for
/// the Qdrant-backed implementation.
#[derive(Default)]
pub struct InMemoryToolIndex {
    points: Mutex<HashMap<Uuid, Vec<f32>>>,
}

impl InMemoryToolIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl ToolIndex for InMemoryToolIndex {
    async fn ensure_collection(&self) -> CatalogResult<()> {
        Ok(())
    }

    async fn upsert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        _payload: serde_json::Value,
    ) -> CatalogResult<()> {
        let mut points = self
            .points
            .lock()
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;
        points.insert(id, vector);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        let mut points = self
            .points
            .lock()
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;
        points.remove(&id);
        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: u64) -> CatalogResult<Vec<ScoredId>> {
        let points = self
            .points
            .lock()
            .map_err(|e| CatalogError::VectorIndex(e.to_string()))?;
        let mut scored: Vec<ScoredId> = points
            .iter()
            .map(|(id, candidate)| ScoredId {
                id: *id,
                score: cosine_similarity(&vector, candidate),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit as usize);
        Ok(scored)
    }

    async fn probe(&self) -> CatalogResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0];
        let c = vec![0.0, 1.0];
        let d = vec![-1.0, 0.0];

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &c).abs() < 1e-6);
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let index = InMemoryToolIndex::new();
        let close = Uuid::now_v7();
        let far = Uuid::now_v7();

        index
            .upsert(close, vec![1.0, 0.1], json!({}))
            .await
            .unwrap();
        index.upsert(far, vec![0.1, 1.0], json!({})).await.unwrap();

        let hits = index.search(vec![1.0, 0.0], 10).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, close);
        assert_eq!(hits[1].id, far);
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_search_respects_limit_and_delete() {
        let index = InMemoryToolIndex::new();
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        index.upsert(a, vec![1.0, 0.0], json!({})).await.unwrap();
        index.upsert(b, vec![0.9, 0.1], json!({})).await.unwrap();

        let hits = index.search(vec![1.0, 0.0], 1).await.unwrap();
        assert_eq!(hits.len(), 1);

        index.delete(a).await.unwrap();
        let hits = index.search(vec![1.0, 0.0], 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, b);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_vector() {
        let index = InMemoryToolIndex::new();
        let id = Uuid::now_v7();

        index.upsert(id, vec![1.0, 0.0], json!({})).await.unwrap();
        index.upsert(id, vec![0.0, 1.0], json!({})).await.unwrap();

        let hits = index.search(vec![0.0, 1.0], 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }
}
