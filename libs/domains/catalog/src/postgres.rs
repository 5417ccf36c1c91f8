use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder,
    QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::entity::{search_history, tool};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateTool, SearchHistoryEntry, SearchResultSummary, Tool, UpdateTool};
use crate::repository::ToolRepository;

/// PostgreSQL-backed repository for tool rows and search history.
#[derive(Clone)]
pub struct PgToolRepository {
    db: DatabaseConnection,
}

impl PgToolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ToolRepository for PgToolRepository {
    async fn create(&self, input: CreateTool) -> CatalogResult<Tool> {
        let active: tool::ActiveModel = input.into();
        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Tool>> {
        let model = tool::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, skip: u64, limit: u64) -> CatalogResult<Vec<Tool>> {
        let models = tool::Entity::find()
            .order_by_asc(tool::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, update: UpdateTool) -> CatalogResult<Tool> {
        let model = tool::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let mut current: Tool = model.into();
        current.apply_update(update);

        let active: tool::ActiveModel = (&current).into();
        let saved = active.update(&self.db).await?;
        Ok(saved.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = tool::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn record_search(
        &self,
        query: &str,
        results: Vec<SearchResultSummary>,
    ) -> CatalogResult<()> {
        let entry = search_history::ActiveModel {
            id: NotSet,
            query: Set(query.to_string()),
            results: Set(json!(results)),
            timestamp: Set(chrono::Utc::now().into()),
        };
        entry.insert(&self.db).await?;
        Ok(())
    }

    async fn list_history(&self, limit: u64) -> CatalogResult<Vec<SearchHistoryEntry>> {
        let models = search_history::Entity::find()
            .order_by_desc(search_history::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
