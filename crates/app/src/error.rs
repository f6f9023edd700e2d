use thiserror::Error;
use voicedoc_core::RetrievalError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("missing credential: {0}")]
    MissingCredential(String),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
