use crate::interactive::WordFilter;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    static ref ACRONYM: Regex = Regex::new(r"^[A-Z0-9]{2,}(['\u{2018}\u{2019}]s)?$").unwrap();
    static ref NUMBER: Regex = Regex::new(r"^[0-9,.\-#]+(th|st|nd|rd)?$").unwrap();
}

/// Decides which words are spellchecked at all.
#[derive(Debug, Clone, Default)]
pub struct ConfigFilter {
    pub ignore_acronyms: bool,
    pub ignore_numbers: bool,
    pub patterns: Vec<Regex>,
}

impl ConfigFilter {
    /// Compile `patterns`, skipping (with a warning) any that are invalid.
    pub fn new(ignore_acronyms: bool, ignore_numbers: bool, patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Invalid ignore pattern");
                    None
                }
            })
            .collect();

        Self {
            ignore_acronyms,
            ignore_numbers,
            patterns,
        }
    }

    fn should_ignore(&self, word: &str) -> bool {
        // Skip single characters
        if word.chars().count() <= 1 {
            return true;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return true;
        }

        if self.ignore_acronyms && ACRONYM.is_match(word) {
            return true;
        }

        if self.ignore_numbers && NUMBER.is_match(word) {
            return true;
        }

        self.patterns.iter().any(|pattern| pattern.is_match(word))
    }
}

impl WordFilter for ConfigFilter {
    fn keep(&self, word: &str) -> bool {
        !self.should_ignore(word)
    }
}
