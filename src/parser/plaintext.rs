use crate::parser::{extract_words, span_at, TextSpan};

/// Parse plain text and extract all words
pub fn parse(content: &str) -> Vec<TextSpan> {
    extract_words(content)
        .into_iter()
        .map(|(word, offset)| span_at(content, word, offset))
        .collect()
}
