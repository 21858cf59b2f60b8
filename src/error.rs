use thiserror::Error;

/// Errors produced while resolving, fetching, caching or opening documentation.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error! status: {0}")]
    Fetch(reqwest::StatusCode),

    #[error("{0}")]
    Extraction(String),

    #[error("Failed to open browser: {0}")]
    BrowserOpen(String),

    #[error("{0} is required")]
    MissingArgument(&'static str),
}

impl DocsError {
    pub(crate) fn extraction(reason: impl Into<String>) -> Self {
        Self::Extraction(reason.into())
    }
}

pub type Result<T, E = DocsError> = std::result::Result<T, E>;
