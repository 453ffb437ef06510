use crate::checker::ConfigFilter;
use crate::interactive::InteractiveOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".spellfix.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language: String,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub max_suggestions: usize,
    /// Look up suggestions for each mistake.
    pub suggestions: bool,
    /// Also keep a `.spelling` beside each checked document.
    pub relative_spelling_files: bool,
    pub ignore_acronyms: bool,
    pub ignore_numbers: bool,
}

/// A config file; only the keys present override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigFile {
    pub language: Option<String>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Option<Vec<String>>,
    pub max_suggestions: Option<usize>,
    pub suggestions: Option<bool>,
    pub relative_spelling_files: Option<bool>,
    pub ignore_acronyms: Option<bool>,
    pub ignore_numbers: Option<bool>,
}

/// Command line overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub personal_dictionary: Option<PathBuf>,
    pub extra_ignore_patterns: Vec<String>,
    pub no_suggestions: bool,
    pub relative_spelling_files: bool,
    pub ignore_acronyms: bool,
    pub ignore_numbers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en_US".to_string(),
            personal_dictionary: None,
            ignore_patterns: vec![
                r"https?://\S+".to_string(),         // URLs
                r"\b[a-fA-F0-9]{32,}\b".to_string(), // Hashes
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
            ],
            max_suggestions: 5,
            suggestions: true,
            relative_spelling_files: false,
            ignore_acronyms: false,
            ignore_numbers: false,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config.merge(Self::from_file(&local_path)?);
        }

        config.apply(overrides);

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(language) = file.language {
            self.language = language;
        }
        if file.personal_dictionary.is_some() {
            self.personal_dictionary = file.personal_dictionary;
        }
        if let Some(patterns) = file.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(max) = file.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(suggestions) = file.suggestions {
            self.suggestions = suggestions;
        }
        if let Some(relative) = file.relative_spelling_files {
            self.relative_spelling_files = relative;
        }
        if let Some(acronyms) = file.ignore_acronyms {
            self.ignore_acronyms = acronyms;
        }
        if let Some(numbers) = file.ignore_numbers {
            self.ignore_numbers = numbers;
        }
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if overrides.personal_dictionary.is_some() {
            self.personal_dictionary = overrides.personal_dictionary;
        }
        self.ignore_patterns.extend(overrides.extra_ignore_patterns);
        self.suggestions &= !overrides.no_suggestions;
        self.relative_spelling_files |= overrides.relative_spelling_files;
        self.ignore_acronyms |= overrides.ignore_acronyms;
        self.ignore_numbers |= overrides.ignore_numbers;
    }

    /// The filter options handed to the word filter.
    pub fn filter(&self) -> ConfigFilter {
        ConfigFilter::new(self.ignore_acronyms, self.ignore_numbers, &self.ignore_patterns)
    }

    pub fn interactive_options(&self) -> InteractiveOptions {
        InteractiveOptions {
            suggestions: self.suggestions,
            relative_spelling_files: self.relative_spelling_files,
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
