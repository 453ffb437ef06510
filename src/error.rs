use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = SpellfixError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SpellfixError {
    /// Dictionary edits could not be written back. Never swallowed.
    #[error("Failed to save spelling file {}: {source}", path.display())]
    SaveSpelling {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write corrections to {}: {source}", path.display())]
    WriteCorrections {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The prompt returned a value that was not among the offered choices.
    #[error("Unrecognised prompt action: {0}")]
    UnrecognisedAction(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
