use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde_json::json;

use crate::models::{CreateTool, Tool};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub tags: Json,
    pub metadata: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Tool {
    fn from(model: Model) -> Self {
        Tool {
            id: model.id,
            name: model.name,
            description: model.description,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            metadata: serde_json::from_value(model.metadata).unwrap_or_default(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&Tool> for ActiveModel {
    fn from(tool: &Tool) -> Self {
        ActiveModel {
            id: Set(tool.id),
            name: Set(tool.name.clone()),
            description: Set(tool.description.clone()),
            tags: Set(json!(tool.tags)),
            metadata: Set(Json::Object(tool.metadata.clone())),
            created_at: Set(tool.created_at.into()),
            updated_at: Set(tool.updated_at.into()),
        }
    }
}

impl From<CreateTool> for ActiveModel {
    fn from(input: CreateTool) -> Self {
        (&Tool::new(input)).into()
    }
}
