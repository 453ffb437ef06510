pub mod markdown;
pub mod plaintext;

use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Markdown,
    PlainText,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" => FileType::Markdown,
            _ => FileType::PlainText,
        }
    }

    /// Whether a directory walk should pick this file up.
    pub fn is_checkable(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
            Some("md" | "mdx" | "markdown" | "txt")
        )
    }
}

#[derive(Debug, Clone)]
pub struct TextSpan {
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub original_text: String, // For context
    pub start: usize,          // Byte offset where the span starts
    pub end: usize,            // Byte offset where the span ends
}

/// Parse a file and extract checkable words with their positions
pub fn parse_file(path: &Path, content: &str) -> Vec<TextSpan> {
    match FileType::from_path(path) {
        FileType::Markdown => markdown::parse(content),
        FileType::PlainText => plaintext::parse(content),
    }
}

/// Words in `text` with their byte offsets. Pure numbers are not words.
pub(crate) fn extract_words(text: &str) -> Vec<(&str, usize)> {
    text.unicode_word_indices()
        .filter(|(_, word)| word.chars().any(char::is_alphabetic))
        .map(|(offset, word)| (word, offset))
        .collect()
}

/// Build a span for the word at byte `start` of `content`.
pub(crate) fn span_at(content: &str, word: &str, start: usize) -> TextSpan {
    let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[start..]
        .find('\n')
        .map_or(content.len(), |i| start + i);

    TextSpan {
        text: word.to_string(),
        line: content[..start].matches('\n').count() + 1,
        column: content[line_start..start].chars().count() + 1,
        original_text: get_context(&content[line_start..line_end], start - line_start, word.len()),
        start,
        end: start + word.len(),
    }
}

fn get_context(line: &str, offset: usize, word_len: usize) -> String {
    let start = floor_boundary(line, offset.saturating_sub(20));
    let end = ceil_boundary(line, (offset + word_len + 20).min(line.len()));
    let context = line[start..end].trim();

    if start > 0 && end < line.len() {
        format!("...{}...", context)
    } else if start > 0 {
        format!("...{}", context)
    } else if end < line.len() {
        format!("{}...", context)
    } else {
        context.to_string()
    }
}

fn floor_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
