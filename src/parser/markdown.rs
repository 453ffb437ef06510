use crate::parser::{extract_words, span_at, TextSpan};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Parse markdown and extract checkable words (skip code blocks, inline code, URLs)
pub fn parse(content: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut in_code_block = false;

    for (event, range) in Parser::new(content).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => {
                let source = &content[range.clone()];
                if source == &*text {
                    for (word, offset) in extract_words(source) {
                        spans.push(span_at(content, word, range.start + offset));
                    }
                    continue;
                }

                // Escapes and entities: find each word in the raw source instead.
                let mut cursor = 0;
                for (word, _) in extract_words(&text) {
                    if let Some(found) = source[cursor..].find(word) {
                        let start = range.start + cursor + found;
                        spans.push(span_at(content, word, start));
                        cursor += found + word.len();
                    }
                }
            }
            _ => {}
        }
    }

    spans
}
