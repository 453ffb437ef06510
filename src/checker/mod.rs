pub mod dictionary;
pub mod filters;
pub mod suggestions;

use crate::interactive::{MistakeSource, SpellService, WordFilter};
use crate::parser::TextSpan;
use crate::spelling::DictionarySession;
use crate::{CheckResult, Config, SpellError, WordInfo};
use anyhow::{Context, Result};
use dictionary::Dictionary;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

pub use filters::ConfigFilter;

pub struct SpellChecker {
    dictionary: Dictionary,
    personal_words: HashSet<String>,
    /// Accepted for the whole run: words ignored or added by the user.
    known_words: HashSet<String>,
    /// Global words of the current document's spelling files.
    session_words: HashSet<String>,
    /// Accepted only in the file currently being checked.
    file_words: HashSet<String>,
    max_suggestions: usize,
}

impl SpellChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let dictionary = Dictionary::load(&config.language)?;
        let mut checker = Self::with_dictionary(dictionary, config.max_suggestions);

        if let Some(personal_dict_path) = &config.personal_dictionary {
            if personal_dict_path.exists() {
                let content = fs::read_to_string(personal_dict_path)
                    .context("Failed to read personal dictionary")?;
                checker.personal_words = content
                    .lines()
                    .map(str::trim)
                    .filter(|word| !word.is_empty() && !word.starts_with('#'))
                    .map(str::to_lowercase)
                    .collect();
                debug!(
                    path = %personal_dict_path.display(),
                    words = checker.personal_words.len(),
                    "Loaded personal dictionary"
                );
            }
        }

        Ok(checker)
    }

    pub fn with_dictionary(dictionary: Dictionary, max_suggestions: usize) -> Self {
        Self {
            dictionary,
            personal_words: HashSet::new(),
            known_words: HashSet::new(),
            session_words: HashSet::new(),
            file_words: HashSet::new(),
            max_suggestions,
        }
    }

    /// Prepare for checking `file`: replace the previous file's dictionary
    /// words with those of `session`. Words the user accepted stay.
    pub fn begin_file(&mut self, session: &DictionarySession, file: &Path) {
        self.session_words = session.global_words().map(str::to_string).collect();
        self.file_words = session
            .file_words(file)
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    /// A scanner over the checkable words of `content`.
    pub fn scan<F: WordFilter>(&self, path: &Path, content: &str, filter: &F) -> TokenScanner {
        TokenScanner::new(
            crate::parser::parse_file(path, content)
                .into_iter()
                .filter(|span| filter.keep(&span.text))
                .collect(),
        )
    }

    /// Report every misspelling in `content`, accepting the session's words.
    pub fn check<F: WordFilter>(
        &self,
        path: &Path,
        content: &str,
        filter: &F,
        session: &DictionarySession,
    ) -> CheckResult {
        let accepted: HashSet<&str> = session
            .global_words()
            .chain(session.file_words(path))
            .collect();
        let is_accepted = |word: &str| {
            accepted.contains(word) || accepted.contains(word.to_lowercase().as_str())
        };

        let errors: Vec<SpellError> = crate::parser::parse_file(path, content)
            .into_iter()
            .filter(|span| filter.keep(&span.text))
            .filter(|span| !is_accepted(&span.text) && !self.check_word(&span.text))
            .map(|span| SpellError {
                suggestions: self.suggest(&span.text),
                word: span.text,
                line: span.line,
                column: span.column,
                context: span.original_text,
            })
            .collect();

        CheckResult {
            error_count: errors.len(),
            fixed_count: 0,
            errors,
        }
    }

    fn accepts(set: &HashSet<String>, word: &str, lower: &str) -> bool {
        set.contains(word) || set.contains(lower)
    }
}

impl SpellService for SpellChecker {
    fn suggest(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();
        let suggestions = suggestions::generate(&lower, &self.dictionary, self.max_suggestions);

        if word.chars().next().is_some_and(char::is_uppercase) {
            suggestions.into_iter().map(|s| capitalise(&s)).collect()
        } else {
            suggestions
        }
    }

    fn check_word(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        Self::accepts(&self.known_words, word, &lower)
            || Self::accepts(&self.session_words, word, &lower)
            || Self::accepts(&self.file_words, word, &lower)
            || self.personal_words.contains(&lower)
            || self.dictionary.contains(&lower)
    }

    fn add_word(&mut self, word: &str, file_scoped: bool) {
        if file_scoped {
            self.file_words.insert(word.to_string());
        } else {
            self.known_words.insert(word.to_string());
        }
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Yields, one at a time, the words the speller rejects at the moment they are reached.
pub struct TokenScanner {
    tokens: std::vec::IntoIter<TextSpan>,
}

impl TokenScanner {
    pub fn new(tokens: Vec<TextSpan>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl MistakeSource for TokenScanner {
    fn next_mistake<S: SpellService>(&mut self, speller: &S) -> Option<WordInfo> {
        self.tokens
            .find(|span| !speller.check_word(&span.text))
            .map(|span| WordInfo {
                word: span.text,
                index: span.start,
            })
    }
}
