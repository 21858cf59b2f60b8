use std::path::PathBuf;

use crate::naming::DOCS_BASE_URL;

/// Runtime settings for the documentation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Cache directory; `None` selects the platform cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Root under which command pages are fetched.
    pub docs_base_url: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            docs_base_url: DOCS_BASE_URL.to_string(),
        }
    }
}

impl DocsConfig {
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    pub fn with_docs_base_url(mut self, docs_base_url: impl Into<String>) -> Self {
        self.docs_base_url = docs_base_url.into();
        self
    }
}
