use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index build failed: {0}")]
    IndexBuild(String),

    #[error("embedding capability error: {0}")]
    EmbeddingCapability(String),

    #[error("no document loaded")]
    NoDocument,
}

pub type Result<T, E = RetrievalError> = std::result::Result<T, E>;
