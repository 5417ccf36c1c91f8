use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Tool entity - a catalog entry with searchable text fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tool {
    /// Unique identifier (server-minted, time-ordered)
    pub id: Uuid,
    /// Tool name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Tags, order preserved as supplied
    pub tags: Vec<String>,
    /// Open key-value metadata
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new tool
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTool {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
}

/// DTO for partially updating an existing tool
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTool {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[schema(value_type = Object)]
    pub metadata: Option<Map<String, Value>>,
}

/// Pagination query for listing tools
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_list_limit")]
    pub limit: u64,
}

fn default_list_limit() -> u64 {
    100
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_list_limit(),
        }
    }
}

/// Semantic search request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    pub query: String,
    #[serde(default = "default_search_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: u64,
}

fn default_search_limit() -> u64 {
    5
}

/// A search hit: the hydrated tool plus its similarity score
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchHit {
    pub tool: Tool,
    pub score: f32,
}

/// Compact per-hit summary stored in the search history log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResultSummary {
    pub id: Uuid,
    pub name: String,
    pub score: f32,
}

/// One logged search: the query, what it matched, and when
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchHistoryEntry {
    pub id: i32,
    pub query: String,
    pub results: Vec<SearchResultSummary>,
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for reading the search history
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: u64,
}

fn default_history_limit() -> u64 {
    50
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

/// Confirmation returned after a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub id: Uuid,
}

/// Render the text a tool is embedded from.
///
/// The trailing tags clause is kept even when the list is empty, so the
/// rendering of a tool is stable as tags come and go.
pub fn embedding_text(name: &str, description: &str, tags: &[String]) -> String {
    format!("{}. {}. Tags: {}", name, description, tags.join(", "))
}

impl Tool {
    /// Create a new tool from a CreateTool DTO
    pub fn new(input: CreateTool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            tags: input.tags,
            metadata: input.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateTool DTO.
    ///
    /// `updated_at` is refreshed even when no field is supplied.
    pub fn apply_update(&mut self, update: UpdateTool) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        self.updated_at = Utc::now();
    }

    /// The text this tool is embedded from, derived from the current row
    pub fn embedding_text(&self) -> String {
        embedding_text(&self.name, &self.description, &self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_input() -> CreateTool {
        CreateTool {
            name: "Numpy".to_string(),
            description: "Numerical computing with arrays".to_string(),
            tags: vec!["python".to_string(), "math".to_string()],
            metadata: Map::new(),
        }
    }

    #[test]
    fn test_embedding_text_with_tags() {
        let text = embedding_text(
            "Numpy",
            "Numerical computing with arrays",
            &["python".to_string(), "math".to_string()],
        );
        assert_eq!(
            text,
            "Numpy. Numerical computing with arrays. Tags: python, math"
        );
    }

    #[test]
    fn test_embedding_text_without_tags() {
        let text = embedding_text("Numpy", "Numerical computing", &[]);
        assert_eq!(text, "Numpy. Numerical computing. Tags: ");
    }

    #[test]
    fn test_tool_new_mints_time_ordered_ids() {
        let a = Tool::new(create_input());
        let b = Tool::new(create_input());
        assert_ne!(a.id, b.id);
        assert!(a.id < b.id, "v7 uuids are time-ordered");
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_apply_update_partial() {
        let mut tool = Tool::new(create_input());
        let created_at = tool.created_at;

        tool.apply_update(UpdateTool {
            tags: Some(vec!["python".to_string(), "arrays".to_string()]),
            ..Default::default()
        });

        assert_eq!(tool.name, "Numpy");
        assert_eq!(tool.description, "Numerical computing with arrays");
        assert_eq!(tool.tags, vec!["python", "arrays"]);
        assert_eq!(tool.created_at, created_at);
        assert!(tool.updated_at >= created_at);
    }

    #[test]
    fn test_apply_update_refreshes_timestamp_even_when_empty() {
        let mut tool = Tool::new(create_input());
        let before = tool.updated_at;

        tool.apply_update(UpdateTool::default());

        assert!(tool.updated_at >= before);
        assert_eq!(tool.name, "Numpy");
    }

    #[test]
    fn test_create_tool_validation() {
        use validator::Validate;

        let valid = create_input();
        assert!(valid.validate().is_ok());

        let empty_name = CreateTool {
            name: String::new(),
            ..create_input()
        };
        assert!(empty_name.validate().is_err());

        let long_name = CreateTool {
            name: "x".repeat(201),
            ..create_input()
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_search_request_limit_bounds() {
        use validator::Validate;

        let ok = SearchRequest {
            query: "arrays".to_string(),
            limit: 50,
        };
        assert!(ok.validate().is_ok());

        let zero = SearchRequest {
            query: "arrays".to_string(),
            limit: 0,
        };
        assert!(zero.validate().is_err());

        let too_big = SearchRequest {
            query: "arrays".to_string(),
            limit: 51,
        };
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_search_request_default_limit() {
        let request: SearchRequest = serde_json::from_value(json!({"query": "arrays"})).unwrap();
        assert_eq!(request.limit, 5);
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
    }
}
