use sea_orm::entity::prelude::*;

use crate::models::SearchHistoryEntry;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "search_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub query: String,
    pub results: Json,
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SearchHistoryEntry {
    fn from(model: Model) -> Self {
        SearchHistoryEntry {
            id: model.id,
            query: model.query,
            results: serde_json::from_value(model.results).unwrap_or_default(),
            timestamp: model.timestamp.to_utc(),
        }
    }
}
