//! Catalog Domain
//!
//! A tool catalog with semantic search: structured records live in
//! PostgreSQL, embeddings of their text live in a Qdrant collection that is
//! kept in sync on every write.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Orchestration: write-through to the vector index,
//! └──────┬──────┘    search + hydration + history logging
//!        │
//! ┌──────▼─────────────┬──────────────┐
//! │ Repository (rows)  │ Index (vectors) + Embedder
//! └────────────────────┴──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_catalog::{
//!     handlers,
//!     index::InMemoryToolIndex,
//!     repository::InMemoryToolRepository,
//!     service::CatalogService,
//! };
//! # use domain_catalog::embedding::Embedder;
//! # fn embedder() -> Arc<dyn Embedder> { unimplemented!() }
//!
//! let service = CatalogService::new(
//!     InMemoryToolRepository::new(),
//!     Arc::new(InMemoryToolIndex::new()),
//!     embedder(),
//! );
//! let router = handlers::router(service);
//! ```

pub mod embedding;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod index;
pub mod models;
pub mod postgres;
pub mod qdrant;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{Embedder, FastEmbedder, EMBEDDING_DIM};
pub use error::{CatalogError, CatalogResult};
pub use index::{InMemoryToolIndex, ScoredId, ToolIndex};
pub use models::{
    CreateTool, DeleteResponse, HistoryQuery, ListQuery, SearchHistoryEntry, SearchHit,
    SearchRequest, SearchResultSummary, Tool, UpdateTool,
};
pub use postgres::PgToolRepository;
pub use qdrant::{QdrantConfig, QdrantToolIndex};
pub use repository::{InMemoryToolRepository, ToolRepository};
pub use service::CatalogService;
