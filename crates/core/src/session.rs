use crate::chunking::{split_sentences, split_text};
use crate::context::assemble_context;
use crate::embeddings::Embedder;
use crate::error::{RetrievalError, Result};
use crate::index::DocumentIndex;
use crate::models::RetrievalResult;
use crate::retriever::retrieve;
use std::sync::{Arc, PoisonError, RwLock};

/// The single owner of the current document's index.
///
/// Lifecycle: absent, then built on a successful `load_document`, then
/// discarded on `reset` or the next upload. Replacement is build-then-swap:
/// the new index is fully constructed before it becomes visible, so a
/// concurrent reader sees either the old index or the new one, never a
/// partial state. A failed build leaves the session with no index.
///
/// The session owns one embedding capability for its whole lifetime, so
/// chunk and query embeddings always come from the same model.
pub struct DocumentSession {
    embedder: Arc<dyn Embedder>,
    chunk_size: usize,
    sentence_aware: bool,
    index: RwLock<Option<Arc<DocumentIndex>>>,
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("chunk_size", &self.chunk_size)
            .field("sentence_aware", &self.sentence_aware)
            .finish_non_exhaustive()
    }
}

impl DocumentSession {
    pub fn new(embedder: Arc<dyn Embedder>, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RetrievalError::InvalidArgument(
                "chunk_size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            embedder,
            chunk_size,
            sentence_aware: false,
            index: RwLock::new(None),
        })
    }

    /// Opt in to the sentence-aware chunking variant for subsequent
    /// loads. The default remains the fixed-size partition.
    pub fn with_sentence_chunking(mut self) -> Self {
        self.sentence_aware = true;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.current_index().is_some()
    }

    pub fn chunk_count(&self) -> usize {
        self.current_index().map_or(0, |index| index.len())
    }

    /// Chunk and index a newly uploaded document, replacing whatever was
    /// loaded before. The previous document is discarded up front; if the
    /// build then fails, the session is left with no index and the error
    /// is returned.
    pub async fn load_document(&self, text: &str) -> Result<usize> {
        self.reset();

        let chunks = if self.sentence_aware {
            split_sentences(text, self.chunk_size)?
        } else {
            split_text(text, self.chunk_size)?
        };

        let built = DocumentIndex::build(chunks, self.embedder.as_ref()).await?;
        let count = built.len();

        let mut slot = self
            .index
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(built));

        Ok(count)
    }

    /// Discard the current index, returning the session to the absent
    /// state.
    pub fn reset(&self) {
        let mut slot = self
            .index
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Embed the query with the session's own embedder and rank the
    /// indexed chunks against it. Empty or whitespace-only query text is
    /// rejected before the embedding capability is invoked.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievalResult> {
        if query.trim().is_empty() {
            return Err(RetrievalError::InvalidArgument(
                "query is empty".to_string(),
            ));
        }

        let index = self.current_index().ok_or(RetrievalError::NoDocument)?;

        let mut vectors = self.embedder.embed_batch(&[query.to_string()]).await?;
        let query_embedding = vectors.pop().ok_or_else(|| {
            RetrievalError::EmbeddingCapability(
                "embedding capability returned no vector for the query".to_string(),
            )
        })?;

        retrieve(&query_embedding, &index, k)
    }

    /// Retrieve and assemble in one step: the newline-joined context
    /// block plus the ranked hits behind it.
    pub async fn retrieve_context(&self, query: &str, k: usize) -> Result<(String, RetrievalResult)> {
        let result = self.retrieve(query, k).await?;
        Ok((assemble_context(&result), result))
    }

    fn current_index(&self) -> Option<Arc<DocumentIndex>> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
