use std::path::PathBuf;
use thiserror::Error;

/// Every failure of an import run. None of these are recoverable: the caller
/// aborts the run, and the store is left as it was before the load started.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Chapter {chapter}: can't parse verse paragraph: {text:?}")]
    VerseParse { chapter: i32, text: String },

    #[error("Chapter {chapter}: section {section} has a first verse but no title")]
    MissingTitle { chapter: i32, section: i32 },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read document {path:?}: {reason}")]
    Document { path: PathBuf, reason: String },

    #[error("No paragraph reader for document extension: {0:?}")]
    UnsupportedDocument(String),

    #[error("Invalid configuration value for {key}: {value:?}")]
    Config { key: String, value: String },

    #[error("Failed to connect to database {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("Failed to execute pending database migrations: {0}")]
    Migration(String),

    #[error("Database error: {0}")]
    Persistence(#[from] diesel::result::Error),
}
