pub mod chunking;
pub mod context;
pub mod embeddings;
pub mod error;
pub mod index;
pub mod models;
pub mod retriever;
pub mod session;

pub use chunking::{split_sentences, split_text, DEFAULT_CHUNK_SIZE};
pub use context::assemble_context;
pub use embeddings::{Embedder, HashingEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{RetrievalError, Result};
pub use index::{DocumentIndex, IndexEntry};
pub use models::{Chunk, DocumentFingerprint, RetrievalResult, ScoredChunk};
pub use retriever::{cosine_similarity, retrieve};
pub use session::DocumentSession;
