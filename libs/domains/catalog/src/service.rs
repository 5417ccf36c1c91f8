use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::embedding::Embedder;
use crate::error::{CatalogError, CatalogResult};
use crate::index::ToolIndex;
use crate::models::{
    CreateTool, DeleteResponse, SearchHistoryEntry, SearchHit, SearchRequest, SearchResultSummary,
    Tool, UpdateTool,
};
use crate::repository::ToolRepository;

/// Orchestrates tool CRUD, the write-through vector index, and semantic
/// search with history logging.
///
/// Writes go to the database first, then to the index. An index failure
/// after a committed row is surfaced as an error so the caller knows the
/// write is only half-applied; the row itself is kept.
pub struct CatalogService<R: ToolRepository, I: ToolIndex> {
    repository: Arc<R>,
    index: Arc<I>,
    embedder: Arc<dyn Embedder>,
}

impl<R: ToolRepository, I: ToolIndex> CatalogService<R, I> {
    pub fn new(repository: R, index: Arc<I>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            repository: Arc::new(repository),
            index,
            embedder,
        }
    }

    /// Embed the tool's text and upsert its point, payload included.
    async fn sync_index(&self, tool: &Tool) -> CatalogResult<()> {
        let vector = self.embedder.embed(&tool.embedding_text())?;
        let payload = json!({
            "name": tool.name,
            "description": tool.description,
            "tags": tool.tags,
            "metadata": tool.metadata,
        });
        self.index.upsert(tool.id, vector, payload).await
    }

    pub async fn insert_tool(&self, input: CreateTool) -> CatalogResult<Tool> {
        input.validate()?;

        let tool = self.repository.create(input).await?;

        if let Err(err) = self.sync_index(&tool).await {
            tracing::warn!(
                tool_id = %tool.id,
                error = %err,
                "tool row committed but vector index write failed"
            );
            return Err(err);
        }

        Ok(tool)
    }

    pub async fn get_tool(&self, id: Uuid) -> CatalogResult<Tool> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    pub async fn list_tools(&self, skip: u64, limit: u64) -> CatalogResult<Vec<Tool>> {
        self.repository.list(skip, limit).await
    }

    pub async fn update_tool(&self, id: Uuid, update: UpdateTool) -> CatalogResult<Tool> {
        update.validate()?;

        let tool = self.repository.update(id, update).await?;

        if let Err(err) = self.sync_index(&tool).await {
            tracing::warn!(
                tool_id = %tool.id,
                error = %err,
                "tool row committed but vector index write failed"
            );
            return Err(err);
        }

        Ok(tool)
    }

    pub async fn delete_tool(&self, id: Uuid) -> CatalogResult<DeleteResponse> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::NotFound(id));
        }

        if let Err(err) = self.index.delete(id).await {
            tracing::warn!(
                tool_id = %id,
                error = %err,
                "tool row deleted but vector index still holds its point"
            );
            return Err(err);
        }

        Ok(DeleteResponse {
            message: "Tool deleted successfully".to_string(),
            id,
        })
    }

    /// Semantic search: embed the query, take the nearest points, hydrate
    /// each hit from the database, and log the search.
    ///
    /// Points without a matching row (a delete raced the search, or an
    /// earlier cleanup failed) are dropped from the results.
    pub async fn search_tools(&self, request: SearchRequest) -> CatalogResult<Vec<SearchHit>> {
        request.validate()?;

        let vector = self.embedder.embed(&request.query)?;
        let scored = self.index.search(vector, request.limit).await?;

        let mut hits = Vec::with_capacity(scored.len());
        for hit in scored {
            match self.repository.get_by_id(hit.id).await? {
                Some(tool) => hits.push(SearchHit {
                    tool,
                    score: hit.score,
                }),
                None => {
                    tracing::warn!(
                        point_id = %hit.id,
                        "vector hit has no matching row, dropping from results"
                    );
                }
            }
        }

        let summaries: Vec<SearchResultSummary> = hits
            .iter()
            .map(|hit| SearchResultSummary {
                id: hit.tool.id,
                name: hit.tool.name.clone(),
                score: hit.score,
            })
            .collect();
        self.repository
            .record_search(&request.query, summaries)
            .await?;

        Ok(hits)
    }

    pub async fn search_history(&self, limit: u64) -> CatalogResult<Vec<SearchHistoryEntry>> {
        self.repository.list_history(limit).await
    }
}
