use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the document currently loaded into a session.
/// Informational only; nothing is persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFingerprint {
    pub title: String,
    pub source_path: String,
    pub checksum: String,
    pub extracted_at: DateTime<Utc>,
}

/// A contiguous substring of the document, the atomic unit of retrieval.
/// `index` is the chunk's position in the original partition order and
/// `start` its character offset into the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub start: usize,
    pub text: String,
}

/// One retrieved chunk with its similarity score against the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Up to k chunks ranked by descending similarity, ties broken by
/// original chunk order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub hits: Vec<ScoredChunk>,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn chunk_texts(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|hit| hit.chunk.text.as_str())
    }
}
