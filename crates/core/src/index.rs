use crate::embeddings::Embedder;
use crate::error::{RetrievalError, Result};
use crate::models::Chunk;

/// Flat in-memory collection of (chunk, embedding) pairs for one
/// document. Built once per document and read-only afterwards; a new
/// upload builds a fresh index rather than mutating this one.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

impl DocumentIndex {
    /// Embed all chunk texts in one batch and zip them with the chunks
    /// in order. Fails with `IndexBuild` if the capability violates its
    /// contract (wrong vector count, or mixed dimensionalities within
    /// one response).
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        if chunks.is_empty() {
            return Ok(Self {
                entries: Vec::new(),
                dimensions: embedder.dimensions(),
            });
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(RetrievalError::IndexBuild(format!(
                "embedding capability returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let dimensions = embeddings[0].len();
        if let Some(odd) = embeddings.iter().find(|vector| vector.len() != dimensions) {
            return Err(RetrievalError::IndexBuild(format!(
                "mixed embedding dimensions in one batch: {} and {}",
                dimensions,
                odd.len()
            )));
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        Ok(Self {
            entries,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}
