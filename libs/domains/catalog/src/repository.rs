use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateTool, SearchHistoryEntry, SearchResultSummary, Tool, UpdateTool};

/// Persistence boundary for tool rows and the search history log.
///
/// Listing is ordered by id ascending. Ids are time-ordered (uuid v7), so
/// this is insertion order. History is ordered newest-first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolRepository: Send + Sync + 'static {
    async fn create(&self, input: CreateTool) -> CatalogResult<Tool>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Tool>>;

    async fn list(&self, skip: u64, limit: u64) -> CatalogResult<Vec<Tool>>;

    /// Apply a partial update. Fails with `NotFound` when the row is missing.
    async fn update(&self, id: Uuid, update: UpdateTool) -> CatalogResult<Tool>;

    /// Returns whether a row was actually removed.
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    async fn record_search(
        &self,
        query: &str,
        results: Vec<SearchResultSummary>,
    ) -> CatalogResult<()>;

    async fn list_history(&self, limit: u64) -> CatalogResult<Vec<SearchHistoryEntry>>;
}

/// In-memory repository backed by a BTreeMap.
///
/// v7 ids sort by creation time, so BTreeMap iteration order matches the
/// pk-ascending order the Postgres implementation returns.
#[derive(Default)]
pub struct InMemoryToolRepository {
    tools: Mutex<BTreeMap<Uuid, Tool>>,
    history: Mutex<Vec<SearchHistoryEntry>>,
}

impl InMemoryToolRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ToolRepository for InMemoryToolRepository {
    async fn create(&self, input: CreateTool) -> CatalogResult<Tool> {
        let tool = Tool::new(input);
        let mut tools = self
            .tools
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        tools.insert(tool.id, tool.clone());
        Ok(tool)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Tool>> {
        let tools = self
            .tools
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(tools.get(&id).cloned())
    }

    async fn list(&self, skip: u64, limit: u64) -> CatalogResult<Vec<Tool>> {
        let tools = self
            .tools
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(tools
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, update: UpdateTool) -> CatalogResult<Tool> {
        let mut tools = self
            .tools
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let tool = tools.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        tool.apply_update(update);
        Ok(tool.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut tools = self
            .tools
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(tools.remove(&id).is_some())
    }

    async fn record_search(
        &self,
        query: &str,
        results: Vec<SearchResultSummary>,
    ) -> CatalogResult<()> {
        let mut history = self
            .history
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let entry = SearchHistoryEntry {
            id: history.len() as i32 + 1,
            query: query.to_string(),
            results,
            timestamp: Utc::now(),
        };
        history.push(entry);
        Ok(())
    }

    async fn list_history(&self, limit: u64) -> CatalogResult<Vec<SearchHistoryEntry>> {
        let history = self
            .history
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(history
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
