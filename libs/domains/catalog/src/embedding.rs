use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::{CatalogError, CatalogResult};

/// Output dimension of the all-MiniLM-L6-v2 model
pub const EMBEDDING_DIM: usize = 384;

/// Turns text into a fixed-size vector.
///
/// Embedding is CPU-bound and synchronous; callers on async paths should
/// treat a call as blocking work.
pub trait Embedder: Send + Sync + 'static {
    fn embed(&self, text: &str) -> CatalogResult<Vec<f32>>;

    fn dimension(&self) -> usize;
}

/// Local ONNX embedder built on fastembed's all-MiniLM-L6-v2.
///
/// The model downloads on first use and is cached on disk afterwards.
/// `TextEmbedding::embed` needs `&mut self`, hence the mutex.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    pub fn new() -> CatalogResult<Self> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|e| CatalogError::Embedding(format!("Failed to load model: {}", e)))?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> CatalogResult<Vec<f32>> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| CatalogError::Embedding(e.to_string()))?;

        let mut vectors = model
            .embed(vec![text], None)
            .map_err(|e| CatalogError::Embedding(e.to_string()))?;

        vectors
            .pop()
            .ok_or_else(|| CatalogError::Embedding("Model returned no vector".to_string()))
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }
}
