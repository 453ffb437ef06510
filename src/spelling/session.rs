use super::{SpellingFile, SPELLING_FILE_NAME};
use crate::error::Result;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Which spelling file an edit goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The run-wide `./.spelling`.
    Shared,
    /// The `.spelling` next to the document being checked.
    Relative,
}

/// The spelling files in use while one document is checked.
#[derive(Debug)]
pub struct DictionarySession {
    shared: SpellingFile,
    relative: Option<SpellingFile>,
}

impl DictionarySession {
    /// Load the shared `./.spelling`, and `relative` when it names a different file.
    pub fn initialise(relative: Option<&Path>) -> Self {
        Self::with_shared_path(Path::new(".").join(SPELLING_FILE_NAME), relative)
    }

    pub fn with_shared_path(shared: impl Into<PathBuf>, relative: Option<&Path>) -> Self {
        let shared = shared.into();
        let relative = relative
            .filter(|path| !same_file(path, &shared))
            .map(Path::to_path_buf);

        let (shared, relative) = match relative {
            Some(relative) => {
                let (shared, relative) = rayon::join(
                    || SpellingFile::load(shared),
                    || SpellingFile::load(relative),
                );
                (shared, Some(relative))
            }
            None => (SpellingFile::load(shared), None),
        };

        info!(
            shared = %shared.path().display(),
            relative = ?relative.as_ref().map(|r| r.path().display().to_string()),
            "Initialised dictionary session"
        );

        Self { shared, relative }
    }

    pub fn add_to_global_dictionary(&mut self, word: &str, scope: Scope) {
        self.store_mut(scope).add_global_word(word);
    }

    pub fn add_to_file_dictionary(&mut self, document: &Path, word: &str, scope: Scope) {
        let key = self.section_key(document, scope);
        self.store_mut(scope).add_file_word(&key, word);
    }

    /// Save one scope. Flushing an unconfigured relative scope does nothing.
    pub fn flush(&mut self, scope: Scope) -> Result<bool> {
        match scope {
            Scope::Shared => self.shared.flush(),
            Scope::Relative => match self.relative.as_mut() {
                Some(relative) => relative.flush(),
                None => Ok(false),
            },
        }
    }

    /// Global words from every loaded scope.
    pub fn global_words(&self) -> impl Iterator<Item = &str> {
        self.stores()
            .flat_map(|store| store.global_words().iter().map(String::as_str))
    }

    /// Words accepted only in `document`, from every loaded scope.
    pub fn file_words<'a>(&'a self, document: &Path) -> Vec<&'a str> {
        let mut words: Vec<&str> = self
            .shared
            .file_words(&self.section_key(document, Scope::Shared))
            .iter()
            .map(String::as_str)
            .collect();
        if let Some(relative) = &self.relative {
            words.extend(
                relative
                    .file_words(&self.section_key(document, Scope::Relative))
                    .iter()
                    .map(String::as_str),
            );
        }
        words
    }

    /// The store backing `scope`; `None` for a relative scope that was never loaded.
    pub fn store(&self, scope: Scope) -> Option<&SpellingFile> {
        match scope {
            Scope::Shared => Some(&self.shared),
            Scope::Relative => self.relative.as_ref(),
        }
    }

    pub fn has_relative(&self) -> bool {
        self.relative.is_some()
    }

    /// Key of the override section for `document` in the file backing `scope`.
    ///
    /// The shared file keys by the document path as given; a relative file
    /// lives beside the document and keys by its file name.
    pub fn section_key(&self, document: &Path, scope: Scope) -> String {
        if scope == Scope::Relative && self.relative.is_some() {
            if let Some(name) = document.file_name() {
                return name.to_string_lossy().into_owned();
            }
        }
        normalise(document)
    }

    fn store_mut(&mut self, scope: Scope) -> &mut SpellingFile {
        match (scope, self.relative.as_mut()) {
            (Scope::Relative, Some(relative)) => relative,
            _ => &mut self.shared,
        }
    }

    fn stores(&self) -> impl Iterator<Item = &SpellingFile> {
        std::iter::once(&self.shared).chain(self.relative.as_ref())
    }
}

/// The relative spelling file for `document`: `.spelling` in its directory.
pub fn relative_spelling_path(document: &Path) -> PathBuf {
    document
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(SPELLING_FILE_NAME)
}

fn same_file(a: &Path, b: &Path) -> bool {
    let significant = |p: &Path| {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_os_string())
            .collect::<Vec<_>>()
    };
    significant(a) == significant(b)
}

fn normalise(document: &Path) -> String {
    document
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
