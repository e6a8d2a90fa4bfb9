use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordhuntError {
    #[error("Unable to read document '{}': {source}", .path.display())]
    AnalysisIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported session format version {version}{}", describe_file(.path))]
    UnsupportedFormatVersion { version: i128, path: Option<PathBuf> },

    #[error("Corrupt session file{}: {reason}", describe_file(.path))]
    CorruptSessionFile { path: Option<PathBuf>, reason: String },

    #[error("Unable to read session file '{}': {source}", .path.display())]
    SessionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write file '{}': {source}", .path.display())]
    SessionWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read word list '{}': {source}", .path.display())]
    WordListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read filter file '{}'", .path.display())]
    FilterRead {
        path: PathBuf,
        #[source]
        source: Box<WordhuntError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid configuration file '{}': {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

fn describe_file(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in '{}'", path.display()),
        None => String::new(),
    }
}

impl WordhuntError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        WordhuntError::CorruptSessionFile { path: None, reason: reason.into() }
    }

    /// Attaches a file reference to decode errors raised before the file was known.
    pub fn at_path(self, file: &Path) -> Self {
        match self {
            WordhuntError::UnsupportedFormatVersion { version, path: None } => {
                WordhuntError::UnsupportedFormatVersion {
                    version,
                    path: Some(file.to_path_buf()),
                }
            }
            WordhuntError::CorruptSessionFile { path: None, reason } => {
                WordhuntError::CorruptSessionFile { path: Some(file.to_path_buf()), reason }
            }
            other => other,
        }
    }

    pub fn filter_read(path: &Path, source: WordhuntError) -> Self {
        WordhuntError::FilterRead { path: path.to_path_buf(), source: Box::new(source) }
    }
}
