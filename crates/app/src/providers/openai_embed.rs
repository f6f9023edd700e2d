use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use voicedoc_core::{Embedder, RetrievalError, Result};

/// Remote embedding capability speaking the OpenAI-compatible
/// `/embeddings` batch API (also served by Ollama and most local
/// embedding servers). Implements the core `Embedder` trait so a session
/// can be pointed at a real model instead of the built-in hashing
/// embedder.
pub struct OpenAiCompatibleEmbedder {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
    client: Client,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiCompatibleEmbedder {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            model: model.into(),
            dimensions,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Embedder for OpenAiCompatibleEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let mut builder = self
            .client
            .post(format!("{}/embeddings", self.endpoint))
            .json(&request);

        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|error| {
            RetrievalError::EmbeddingCapability(format!("embedding request failed: {error}"))
        })?;

        if !response.status().is_success() {
            return Err(RetrievalError::EmbeddingCapability(format!(
                "embedding endpoint returned {}",
                response.status()
            )));
        }

        let payload: EmbeddingResponse = response.json().await.map_err(|error| {
            RetrievalError::EmbeddingCapability(format!("embedding response decode failed: {error}"))
        })?;

        Ok(payload.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::EmbeddingResponse;

    #[test]
    fn response_payload_preserves_vector_order() {
        let payload: EmbeddingResponse = serde_json::from_str(
            r#"{ "data": [ { "embedding": [0.1, 0.2] }, { "embedding": [0.3, 0.4] } ] }"#,
        )
        .unwrap();

        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.data[0].embedding, vec![0.1, 0.2]);
        assert_eq!(payload.data[1].embedding, vec![0.3, 0.4]);
    }
}
