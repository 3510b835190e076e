use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unsupported site: {url}")]
    UnsupportedSite { url: String },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Parsing error: {message}")]
    Parse { message: String },

    #[error("Price store error at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt price record at {}: {content:?}", path.display())]
    CorruptRecord { path: PathBuf, content: String },

    #[error("Notification error: {0}")]
    Notify(String),
}

impl AppError {
    /// Only bad invocations stop the process; every other failure is logged
    /// and the run ends normally.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Argument(_))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
