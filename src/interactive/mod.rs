//! Interactive fixing of spelling mistakes.
//!
//! [`InteractiveFixer`] walks the mistakes of one document, asks the user
//! what to do with each, records dictionary additions in the
//! [`DictionarySession`](crate::spelling::DictionarySession) and finally
//! rewrites the document with the chosen corrections.
//!
//! Everything the fixer talks to is behind a trait so the terminal, the
//! word list and the file system can be swapped out.

pub mod context;
pub mod controller;
pub mod corrections;

pub use controller::{InteractiveFixer, InteractiveOptions};
pub use corrections::{apply_corrections, FileCorrectionWriter};

use crate::error::Result;
use crate::spelling::Scope;
use crate::{Correction, WordInfo};
use std::fmt;
use std::path::Path;

/// Word checking and suggestions.
pub trait SpellService {
    /// Candidate replacements, best first.
    fn suggest(&self, word: &str) -> Vec<String>;

    fn check_word(&self, word: &str) -> bool;

    /// Accept `word` for the rest of the run, or only for the current file.
    fn add_word(&mut self, word: &str, file_scoped: bool);
}

/// Asks the user questions.
pub trait Prompter {
    /// Present `choices` with `default` preselected and return the chosen action.
    fn select(&mut self, message: &str, choices: &[Choice], default: usize) -> Result<Action>;

    /// Ask for free text, prefilled with `default`.
    fn input(&mut self, message: &str, default: &str) -> Result<String>;
}

/// Drops words that should not be spellchecked at all.
pub trait WordFilter {
    fn keep(&self, word: &str) -> bool;

    /// The words that survive filtering, in order.
    fn filter(&self, words: &[String]) -> Vec<String> {
        words.iter().filter(|w| self.keep(w)).cloned().collect()
    }
}

/// A one-pass source of spelling mistakes for a document.
///
/// Each call judges against the speller as it is *now*, so words accepted
/// earlier in the run are not reported again.
pub trait MistakeSource {
    fn next_mistake<S: SpellService>(&mut self, speller: &S) -> Option<WordInfo>;
}

/// Applies collected corrections to a document.
pub trait CorrectionWriter {
    fn write_corrections(&mut self, src: &str, file: &Path, corrections: &[Correction])
        -> Result<()>;
}

/// What the user can do with a mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Accept the word for this run only.
    Ignore,
    /// Accept the word in this file and record it in the file's override section.
    FileIgnore { scope: Scope },
    /// Record the word in the global dictionary; `cased` keeps its capitalisation.
    Add { cased: bool, scope: Scope },
    /// Type a replacement.
    Enter,
    /// Replace with the suggestion at this position.
    Suggestion(usize),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = |scope: &Scope| match scope {
            Scope::Shared => "",
            Scope::Relative => "[Relative] ",
        };
        match self {
            Action::Ignore => write!(f, "Ignore"),
            Action::FileIgnore { scope } => write!(f, "{}Add to file ignores", prefix(scope)),
            Action::Add { cased: false, scope } => {
                write!(f, "{}Add to dictionary - case insensitive", prefix(scope))
            }
            Action::Add { cased: true, scope } => {
                write!(f, "{}Add to dictionary - case sensitive", prefix(scope))
            }
            Action::Enter => write!(f, "Enter correct spelling"),
            Action::Suggestion(index) => write!(f, "Suggestion #{}", index),
        }
    }
}

/// One entry of the menu shown for a mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub action: Action,
}

impl Choice {
    pub fn action(action: Action) -> Self {
        Self {
            label: action.to_string(),
            action,
        }
    }

    pub fn suggestion(index: usize, word: &str) -> Self {
        Self {
            label: word.to_string(),
            action: Action::Suggestion(index),
        }
    }
}
