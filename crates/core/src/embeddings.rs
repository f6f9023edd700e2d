use crate::error::Result;
use async_trait::async_trait;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

/// Batch text-to-vector capability. Implementations must be
/// order-preserving (vector `i` corresponds to input `i`) and must keep
/// the same model for their whole lifetime; one index is only meaningful
/// against queries embedded by the same capability instance.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dimensions(&self) -> usize;

    fn model_name(&self) -> &str;

    /// Embed a batch of texts. Errors are propagated opaquely as
    /// `RetrievalError::EmbeddingCapability`; retry policy belongs to
    /// the caller.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Deterministic character-trigram feature-hashing embedder. No model
/// download, no network; used when no remote embedding endpoint is
/// configured and as the stub-free default in tests.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    pub dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

impl HashingEmbedder {
    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions.max(1)];
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        if chars.is_empty() {
            return vector;
        }

        for window in chars.windows(3) {
            let token = window.iter().collect::<String>();
            let mut hash = 1469598103934665603u64;
            for byte in token.bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(1099511628211);
            }
            let bucket = (hash % vector.len() as u64) as usize;
            vector[bucket] += 1.0;
        }

        let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "char-trigram-hash"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Embedder, HashingEmbedder};

    #[tokio::test]
    async fn embedder_is_deterministic() {
        let embedder = HashingEmbedder::default();
        let input = vec!["the hydraulic pressure dropped".to_string()];
        let first = embedder.embed_batch(&input).await.unwrap();
        let second = embedder.embed_batch(&input).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn embedder_outputs_expected_length_per_input() {
        let embedder = HashingEmbedder { dimensions: 32 };
        let inputs = vec!["abc".to_string(), "defghi".to_string()];
        let vectors = embedder.embed_batch(&inputs).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|vector| vector.len() == 32));
    }

    #[tokio::test]
    async fn empty_text_embeds_to_the_zero_vector() {
        let embedder = HashingEmbedder { dimensions: 8 };
        let vectors = embedder.embed_batch(&[String::new()]).await.unwrap();
        assert!(vectors[0].iter().all(|value| *value == 0.0));
    }
}
