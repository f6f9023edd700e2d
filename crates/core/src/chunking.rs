use crate::error::{RetrievalError, Result};
use crate::models::Chunk;

pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Split `text` into contiguous fixed-size chunks of `chunk_size`
/// characters. Chunk `i` covers `[i * chunk_size, (i + 1) * chunk_size)`;
/// the final chunk may be shorter. The partition is deterministic and
/// boundary-unaware: chunks may split mid-word or mid-sentence, which
/// keeps the output reproducible for a given input.
///
/// Empty text yields an empty sequence. `chunk_size` of zero is rejected.
pub fn split_text(text: &str, chunk_size: usize) -> Result<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(RetrievalError::InvalidArgument(
            "chunk_size must be greater than zero".to_string(),
        ));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::with_capacity(chars.len().div_ceil(chunk_size));
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(Chunk {
            index: chunks.len(),
            start,
            text: chars[start..end].iter().collect(),
        });
        start = end;
    }

    Ok(chunks)
}

/// Sentence-aware variant: packs whole sentences into chunks of at most
/// `chunk_size` characters. A single sentence longer than `chunk_size`
/// falls back to the fixed-size split for that sentence. Opt-in only;
/// `split_text` remains the default contract.
pub fn split_sentences(text: &str, chunk_size: usize) -> Result<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(RetrievalError::InvalidArgument(
            "chunk_size must be greater than zero".to_string(),
        ));
    }

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current = String::new();
    let mut current_start = 0;
    let mut cursor = 0;

    for sentence in sentence_spans(text) {
        let sentence_len = sentence.chars().count();

        if !current.is_empty() && current.chars().count() + sentence_len > chunk_size {
            push_chunk(&mut chunks, &mut current, current_start);
            current_start = cursor;
        }

        if sentence_len > chunk_size && current.is_empty() {
            for piece in split_text(sentence, chunk_size)? {
                chunks.push(Chunk {
                    index: chunks.len(),
                    start: cursor + piece.start,
                    text: piece.text,
                });
            }
            cursor += sentence_len;
            current_start = cursor;
            continue;
        }

        current.push_str(sentence);
        cursor += sentence_len;
    }

    if !current.is_empty() {
        push_chunk(&mut chunks, &mut current, current_start);
    }

    Ok(chunks)
}

fn push_chunk(chunks: &mut Vec<Chunk>, current: &mut String, start: usize) {
    chunks.push(Chunk {
        index: chunks.len(),
        start,
        text: std::mem::take(current),
    });
}

/// Splits text after sentence terminators, keeping the terminator and any
/// trailing whitespace attached so that concatenation is lossless.
fn sentence_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut after_terminator = false;

    for (offset, character) in text.char_indices() {
        if after_terminator && !character.is_whitespace() {
            spans.push(&text[start..offset]);
            start = offset;
            after_terminator = false;
        }
        if matches!(character, '.' | '!' | '?') {
            after_terminator = true;
        }
    }

    if start < text.len() {
        spans.push(&text[start..]);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_lossless() {
        let text = "The quick brown fox jumps over the lazy dog";
        for chunk_size in [1, 3, 7, 500] {
            let chunks = split_text(text, chunk_size).unwrap();
            let rebuilt: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
            assert_eq!(rebuilt, text);
        }
    }

    #[test]
    fn every_chunk_but_the_last_is_full_size() {
        let chunks = split_text("abcdefghij", 4).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "abcd");
        assert_eq!(chunks[1].text, "efgh");
        assert_eq!(chunks[2].text, "ij");
        assert_eq!(chunks[1].start, 4);
        assert_eq!(chunks[2].index, 2);
    }

    #[test]
    fn fifteen_chars_at_size_five_make_three_chunks() {
        let chunks = split_text("AAAAABBBBBCCCCC", 5).unwrap();
        let texts: Vec<&str> = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
        assert_eq!(texts, vec!["AAAAA", "BBBBB", "CCCCC"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunks = split_text("", 10).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let error = split_text("anything", 0).unwrap_err();
        assert!(matches!(error, RetrievalError::InvalidArgument(_)));
        assert!(matches!(
            split_sentences("anything", 0),
            Err(RetrievalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn multibyte_text_splits_on_character_boundaries() {
        let chunks = split_text("héllo wörld", 4).unwrap();
        let rebuilt: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
        assert_eq!(rebuilt, "héllo wörld");
        assert_eq!(chunks[0].text.chars().count(), 4);
    }

    #[test]
    fn sentence_variant_keeps_short_sentences_whole() {
        let text = "One fish. Two fish. Red fish blue fish.";
        let chunks = split_sentences(text, 20).unwrap();
        let rebuilt: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
        assert_eq!(rebuilt, text);
        for chunk in &chunks {
            assert!(!chunk.text.trim_end().ends_with("fis"));
        }
        assert!(chunks[0].text.starts_with("One fish."));
    }

    #[test]
    fn sentence_variant_falls_back_on_oversized_sentences() {
        let text = "aaaaaaaaaaaaaaaaaaaa";
        let chunks = split_sentences(text, 8).unwrap();
        let rebuilt: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
        assert_eq!(rebuilt, text);
        assert!(chunks.iter().all(|chunk| chunk.text.chars().count() <= 8));
    }
}
