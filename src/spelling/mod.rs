//! The `.spelling` dictionary file.
//!
//! A spelling file holds a global word list followed by per-file override
//! sections, each opened by a ` - <path>` marker line:
//!
//! ```text
//! # comment
//! globalword
//!  - docs/guide.md
//! guideonlyword
//! ```
//!
//! Edits are applied in place to the raw lines so comments, ordering and the
//! original line endings survive a rewrite. The insertion points for new
//! words are tracked as line indices and shifted on every insertion.

pub mod session;

pub use session::{DictionarySession, Scope};

use crate::error::{Result, SpellfixError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional name of the spelling file shared by a whole run.
pub const SPELLING_FILE_NAME: &str = ".spelling";

const EMPTY_FILE_HEADER: [&str; 5] = [
    "# spellfix spelling configuration file",
    "# Format - lines beginning # are comments",
    "# global dictionary is at the start, file overrides afterwards",
    "# one word per line, to define a file override use ' - filename'",
    "# where filename is relative to this configuration file",
];

lazy_static! {
    static ref FILE_MARKER: Regex = Regex::new(r"^\s*-\s+(.*)").unwrap();
}

/// Words accepted for a single file, and where the next one goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSection {
    /// Line at which the next word for this file is inserted.
    pub index: usize,
    pub words: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SpellingFile {
    path: PathBuf,
    lines: Vec<String>,
    last_line_of_global_spellings: usize,
    global_words: Vec<String>,
    file_sections: BTreeMap<String, FileSection>,
    crlf: bool,
    dirty: bool,
}

impl SpellingFile {
    /// Read `path`, falling back to a fresh file when it is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "Loaded spelling file");
                Self::parse(path, &text)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Spelling file unavailable, starting empty");
                Self::empty(path)
            }
        }
    }

    /// A new file containing only the comment header.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        let mut lines: Vec<String> = EMPTY_FILE_HEADER.iter().map(|l| l.to_string()).collect();
        lines.push(String::new());

        Self {
            path: path.into(),
            last_line_of_global_spellings: lines.len() - 1,
            lines,
            global_words: Vec::new(),
            file_sections: BTreeMap::new(),
            crlf: false,
            dirty: false,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let crlf = text.contains('\r');
        let text = if crlf {
            text.replace('\r', "")
        } else {
            text.to_string()
        };

        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let mut global_words = Vec::new();
        let mut file_sections: BTreeMap<String, FileSection> = BTreeMap::new();
        let mut last_line_of_global_spellings = None;
        let mut current_file: Option<String> = None;
        let mut last_non_comment: Option<usize> = None;

        for (index, line) in lines.iter().enumerate() {
            if is_comment_or_blank(line) {
                continue;
            }

            if let Some(caps) = FILE_MARKER.captures(line) {
                let end_of_previous = last_non_comment.map_or(index, |i| i + 1);
                match current_file.take() {
                    None => last_line_of_global_spellings = Some(end_of_previous),
                    Some(previous) => {
                        if let Some(section) = file_sections.get_mut(&previous) {
                            section.index = end_of_previous;
                        }
                    }
                }
                let name = caps[1].trim().to_string();
                file_sections.entry(name.clone()).or_default();
                current_file = Some(name);
            } else {
                let word = line.trim().to_string();
                match &current_file {
                    None => global_words.push(word),
                    Some(name) => {
                        if let Some(section) = file_sections.get_mut(name) {
                            section.words.push(word);
                        }
                    }
                }
            }
            last_non_comment = Some(index);
        }

        // always end on a blank line
        if lines.last().map_or(true, |l| !l.is_empty()) {
            lines.push(String::new());
        }
        let end_of_content = last_non_comment.map_or(lines.len() - 1, |i| i + 1);

        let last_line_of_global_spellings = match current_file {
            None => end_of_content,
            Some(name) => {
                if let Some(section) = file_sections.get_mut(&name) {
                    section.index = end_of_content;
                }
                last_line_of_global_spellings.unwrap_or(end_of_content)
            }
        };

        Self {
            path: path.into(),
            lines,
            last_line_of_global_spellings,
            global_words,
            file_sections,
            crlf,
            dirty: false,
        }
    }

    pub fn add_global_word(&mut self, word: &str) {
        self.global_words.push(word.to_string());
        self.lines
            .insert(self.last_line_of_global_spellings, word.to_string());
        self.dirty = true;
        self.last_line_of_global_spellings += 1;
        for section in self.file_sections.values_mut() {
            section.index += 1;
        }
    }

    pub fn add_file_word(&mut self, file_name: &str, word: &str) {
        self.dirty = true;

        if let Some(at) = self.file_sections.get(file_name).map(|s| s.index) {
            self.lines.insert(at, word.to_string());
            for section in self.file_sections.values_mut() {
                if section.index >= at {
                    section.index += 1;
                }
            }
            if let Some(section) = self.file_sections.get_mut(file_name) {
                section.words.push(word.to_string());
            }
            return;
        }

        let at = self.lines.len() - 1;
        self.lines.insert(at, format!(" - {}", file_name));
        self.lines.insert(at + 1, word.to_string());
        self.file_sections.insert(
            file_name.to_string(),
            FileSection {
                index: self.lines.len() - 1,
                words: vec![word.to_string()],
            },
        );
    }

    /// Write the file if it has unsaved edits. Returns whether anything was written.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        fs::write(&self.path, self.to_text()).map_err(|source| SpellfixError::SaveSpelling {
            path: self.path.clone(),
            source,
        })?;
        self.dirty = false;
        debug!(path = %self.path.display(), "Saved spelling file");

        Ok(true)
    }

    pub fn to_text(&self) -> String {
        self.lines.join(if self.crlf { "\r\n" } else { "\n" })
    }

    pub fn global_words(&self) -> &[String] {
        &self.global_words
    }

    /// Words accepted only in `file_name`; empty when it has no section.
    pub fn file_words(&self, file_name: &str) -> &[String] {
        self.file_sections
            .get(file_name)
            .map(|section| section.words.as_slice())
            .unwrap_or(&[])
    }

    pub fn section(&self, file_name: &str) -> Option<&FileSection> {
        self.file_sections.get(file_name)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last_line_of_global_spellings(&self) -> usize {
        self.last_line_of_global_spellings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_crlf(&self) -> bool {
        self.crlf
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

fn is_comment_or_blank(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}
