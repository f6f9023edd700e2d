use crate::models::RetrievalResult;

/// Join the retrieved chunk texts with newlines, in ranked order. No
/// deduplication, truncation, or token-budget enforcement; callers that
/// need a token limit must apply it themselves.
pub fn assemble_context(result: &RetrievalResult) -> String {
    result.chunk_texts().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::assemble_context;
    use crate::models::{Chunk, RetrievalResult, ScoredChunk};

    fn result_with(texts: &[&str]) -> RetrievalResult {
        RetrievalResult {
            hits: texts
                .iter()
                .enumerate()
                .map(|(index, text)| ScoredChunk {
                    chunk: Chunk {
                        index,
                        start: 0,
                        text: text.to_string(),
                    },
                    score: 1.0 - index as f32 * 0.1,
                })
                .collect(),
        }
    }

    #[test]
    fn chunks_are_joined_with_newlines_in_ranked_order() {
        let context = assemble_context(&result_with(&["most relevant", "second", "third"]));
        assert_eq!(context, "most relevant\nsecond\nthird");
    }

    #[test]
    fn empty_result_assembles_to_an_empty_string() {
        assert_eq!(assemble_context(&RetrievalResult::default()), "");
    }

    #[test]
    fn duplicate_chunks_are_kept() {
        let context = assemble_context(&result_with(&["same", "same"]));
        assert_eq!(context, "same\nsame");
    }
}
