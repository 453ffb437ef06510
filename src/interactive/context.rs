use crate::WordInfo;
use colored::*;
use std::path::Path;

/// 1-based line and column (in chars) of the byte offset `index` in `src`.
pub fn locate(src: &str, index: usize) -> Option<(usize, usize)> {
    let before = src.get(..index)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = before.matches('\n').count() + 1;
    let column = before[line_start..].chars().count() + 1;
    Some((line, column))
}

/// `file:line:column` followed by the offending line with the word highlighted.
pub fn describe_mistake(file: &Path, src: &str, word_info: &WordInfo) -> String {
    let start = word_info.index;
    let end = start + word_info.word.len();

    let (line, column) = match locate(src, start) {
        Some(position) if src.get(start..end) == Some(word_info.word.as_str()) => position,
        _ => return format!("{} {}", file.display(), word_info.word.red().bold()),
    };

    let line_start = src[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = src[end..].find('\n').map_or(src.len(), |i| end + i);

    format!(
        "{}:{}:{}\n  {}{}{}",
        file.display(),
        line,
        column,
        src[line_start..start].trim_start(),
        src[start..end].red().bold(),
        src[end..line_end].trim_end()
    )
}
