use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StopwordsError>;

#[derive(Error, Debug)]
pub enum StopwordsError {
    /// The language data is unusable: the data directory is missing, or the
    /// default language itself cannot be loaded. Never recovered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No word list exists for the requested language code.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StopwordsError {
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        StopwordsError::Configuration(msg.into())
    }

    /// Process exit status the binary reports for this error.
    /// Usage errors are kept apart from configuration failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            StopwordsError::MissingArgument(_) | StopwordsError::InvalidOption(_) => 2,
            StopwordsError::Configuration(_)
            | StopwordsError::UnsupportedLanguage(_)
            | StopwordsError::InputNotFound(_)
            | StopwordsError::Io(_) => 1,
        }
    }

    pub fn is_unsupported_language(&self) -> bool {
        matches!(self, StopwordsError::UnsupportedLanguage(_))
    }
}
