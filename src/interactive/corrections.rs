use super::CorrectionWriter;
use crate::error::{Result, SpellfixError};
use crate::Correction;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Replace each corrected word in `src`, in offset order.
///
/// A correction is skipped when its offset no longer holds the original
/// word or overlaps one already applied.
pub fn apply_corrections(src: &str, corrections: &[Correction]) -> String {
    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by_key(|c| c.word_info.index);

    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;

    for correction in ordered {
        let start = correction.word_info.index;
        let end = start + correction.word_info.word.len();

        if start < cursor || src.get(start..end) != Some(correction.word_info.word.as_str()) {
            warn!(
                word = %correction.word_info.word,
                index = start,
                "Skipping correction that no longer matches the source"
            );
            continue;
        }

        out.push_str(&src[cursor..start]);
        out.push_str(&correction.new_word);
        cursor = end;
    }

    out.push_str(&src[cursor..]);
    out
}

/// Writes corrected documents back to disk.
#[derive(Debug, Default)]
pub struct FileCorrectionWriter;

impl CorrectionWriter for FileCorrectionWriter {
    fn write_corrections(
        &mut self,
        src: &str,
        file: &Path,
        corrections: &[Correction],
    ) -> Result<()> {
        let corrected = apply_corrections(src, corrections);
        fs::write(file, corrected).map_err(|source| SpellfixError::WriteCorrections {
            path: file.to_path_buf(),
            source,
        })?;
        debug!(file = %file.display(), count = corrections.len(), "Wrote corrections");
        Ok(())
    }
}
