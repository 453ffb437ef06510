pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod interactive;
pub mod parser;
pub mod spelling;

pub use checker::SpellChecker;
pub use config::Config;
pub use error::{Result, SpellfixError};
pub use interactive::{InteractiveFixer, InteractiveOptions};
pub use spelling::{DictionarySession, Scope, SpellingFile};

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub error_count: usize,
    pub fixed_count: usize,
    pub errors: Vec<SpellError>,
}

#[derive(Debug, Clone)]
pub struct SpellError {
    pub word: String,
    pub line: usize,
    pub column: usize,
    pub context: String,
    pub suggestions: Vec<String>,
}

/// A misspelt word and its byte offset in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    pub word: String,
    pub index: usize,
}

/// A replacement chosen for one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub word_info: WordInfo,
    pub new_word: String,
}
