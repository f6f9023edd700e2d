use crate::error::{RetrievalError, Result};
use crate::index::DocumentIndex;
use crate::models::{RetrievalResult, ScoredChunk};

/// Cosine similarity `dot(a, b) / (||a|| * ||b||)`. If either vector has
/// zero magnitude the similarity is defined as 0.0 rather than an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|value| value * value).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|value| value * value).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}

/// Score every chunk in the index against the query embedding and return
/// the `min(k, len)` best, ranked by descending similarity with ties
/// broken by ascending original chunk index. Linear scan; document scale
/// keeps O(n) scoring per query acceptable.
///
/// Pure read over the index; safe to call concurrently for different
/// queries against the same index.
pub fn retrieve(
    query_embedding: &[f32],
    index: &DocumentIndex,
    k: usize,
) -> Result<RetrievalResult> {
    if k == 0 {
        return Err(RetrievalError::InvalidArgument(
            "k must be greater than zero".to_string(),
        ));
    }

    if index.is_empty() {
        return Ok(RetrievalResult::default());
    }

    if query_embedding.is_empty() {
        return Err(RetrievalError::InvalidArgument(
            "query embedding is absent".to_string(),
        ));
    }

    if query_embedding.len() != index.dimensions() {
        return Err(RetrievalError::InvalidArgument(format!(
            "query embedding dimension {} does not match index dimension {}",
            query_embedding.len(),
            index.dimensions()
        )));
    }

    let mut scored: Vec<ScoredChunk> = index
        .entries()
        .iter()
        .map(|entry| ScoredChunk {
            chunk: entry.chunk.clone(),
            score: cosine_similarity(query_embedding, &entry.embedding),
        })
        .collect();

    scored.sort_by(|left, right| {
        right
            .score
            .total_cmp(&left.score)
            .then(left.chunk.index.cmp(&right.chunk.index))
    });
    scored.truncate(k);

    Ok(RetrievalResult { hits: scored })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::Embedder;
    use crate::error::Result;
    use crate::index::DocumentIndex;
    use crate::models::Chunk;
    use async_trait::async_trait;

    const EPSILON: f32 = 1e-6;

    /// Maps each text to a fixed vector so rankings are known up front.
    struct TableEmbedder {
        vectors: Vec<Vec<f32>>,
    }

    #[async_trait]
    impl Embedder for TableEmbedder {
        fn dimensions(&self) -> usize {
            self.vectors.first().map_or(0, Vec::len)
        }

        fn model_name(&self) -> &str {
            "table"
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .enumerate()
                .map(|(position, _)| self.vectors[position].clone())
                .collect())
        }
    }

    async fn index_with(vectors: Vec<Vec<f32>>, texts: &[&str]) -> DocumentIndex {
        let chunks = texts
            .iter()
            .enumerate()
            .map(|(index, text)| Chunk {
                index,
                start: 0,
                text: text.to_string(),
            })
            .collect();
        DocumentIndex::build(chunks, &TableEmbedder { vectors })
            .await
            .unwrap()
    }

    #[test]
    fn cosine_of_a_vector_with_itself_is_one() {
        let vector = [0.3f32, -1.2, 4.5];
        assert!((cosine_similarity(&vector, &vector) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [-2.0f32, 0.5, 1.0];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < EPSILON);
    }

    #[test]
    fn zero_magnitude_vectors_score_zero() {
        let zero = [0.0f32, 0.0];
        let other = [1.0f32, 1.0];
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
        assert_eq!(cosine_similarity(&other, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[tokio::test]
    async fn most_similar_chunk_ranks_first() {
        let index = index_with(
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]],
            &["AAAAA", "BBBBB", "CCCCC"],
        )
        .await;

        let result = retrieve(&[0.0, 1.0], &index, 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.hits[0].chunk.text, "BBBBB");
    }

    #[tokio::test]
    async fn k_larger_than_index_returns_everything_ranked() {
        let index = index_with(
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]],
            &["a", "b", "c"],
        )
        .await;

        let result = retrieve(&[1.0, 0.0], &index, 10).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.hits[0].chunk.text, "a");
        assert_eq!(result.hits[1].chunk.text, "c");
        assert_eq!(result.hits[2].chunk.text, "b");
    }

    #[tokio::test]
    async fn ties_keep_original_chunk_order() {
        // All three vectors are identical, so ranking falls back to
        // document order.
        let index = index_with(
            vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]],
            &["first", "second", "third"],
        )
        .await;

        let result = retrieve(&[1.0, 0.0], &index, 3).unwrap();
        let order: Vec<&str> = result.chunk_texts().collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn zero_k_is_rejected() {
        let index = index_with(vec![vec![1.0, 0.0]], &["a"]).await;
        let error = retrieve(&[1.0, 0.0], &index, 0).unwrap_err();
        assert!(matches!(error, RetrievalError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn empty_query_embedding_is_rejected() {
        let index = index_with(vec![vec![1.0, 0.0]], &["a"]).await;
        let error = retrieve(&[], &index, 3).unwrap_err();
        assert!(matches!(error, RetrievalError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn mismatched_query_dimension_is_rejected() {
        let index = index_with(vec![vec![1.0, 0.0]], &["a"]).await;
        let error = retrieve(&[1.0, 0.0, 0.0], &index, 3).unwrap_err();
        assert!(matches!(error, RetrievalError::InvalidArgument(_)));
    }

    #[test]
    fn empty_index_returns_an_empty_result() {
        let index = DocumentIndex::default();
        let result = retrieve(&[1.0, 0.0], &index, 3).unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn all_zero_query_returns_chunks_in_document_order() {
        let index = index_with(vec![vec![1.0, 0.0], vec![0.0, 1.0]], &["a", "b"]).await;
        let result = retrieve(&[0.0, 0.0], &index, 2).unwrap();
        let order: Vec<&str> = result.chunk_texts().collect();
        assert_eq!(order, vec!["a", "b"]);
        assert!(result.hits.iter().all(|hit| hit.score == 0.0));
    }
}
