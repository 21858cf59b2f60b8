//! The documentation cache service shared by the MCP tools and the editor
//! commands.

use std::sync::Arc;

use crate::browser::{SystemOpener, UrlOpener};
use crate::cache::{Cache, DiskCache};
use crate::config::DocsConfig;
use crate::docs_client::DocsClient;
use crate::error::Result;

/// Resolves command names to documentation, caching fetched fragments.
#[derive(Clone)]
pub struct DocService {
    cache: Arc<dyn Cache>,
    client: DocsClient,
    opener: Arc<dyn UrlOpener>,
}

impl DocService {
    pub fn new(cache: Arc<dyn Cache>, client: DocsClient, opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            cache,
            client,
            opener,
        }
    }

    /// Builds the service with a disk cache and the system browser.
    ///
    /// The cache directory is not touched here; it is resolved and created by
    /// the first operation that needs it.
    pub fn from_config(config: &DocsConfig) -> Result<Self> {
        let cache = match &config.cache_dir {
            Some(dir) => DiskCache::new(dir.clone()),
            None => DiskCache::platform_default(),
        };
        tracing::debug!("Using documentation cache at {:?}", cache.cache_dir());

        let client = DocsClient::new_with_base_url(&config.docs_base_url)?;
        Ok(Self::new(Arc::new(cache), client, Arc::new(SystemOpener)))
    }

    pub fn command_url(&self, command_name: &str) -> String {
        self.client.command_url(command_name)
    }

    /// Returns the documentation fragment for a command.
    ///
    /// A cached entry is returned as-is without contacting the site. On a miss
    /// the page is fetched and extracted, and the fragment is cached only once
    /// extraction succeeded.
    pub async fn fetch_documentation(&self, command_name: &str) -> Result<String> {
        if let Some(content) = self.cache.get(command_name).await? {
            tracing::info!("Cache hit for command: {}", command_name);
            return Ok(content);
        }

        tracing::info!("Cache miss for command: {}. Fetching...", command_name);
        let article = self.client.fetch_article(command_name).await?;

        self.cache.insert(command_name, &article).await?;
        tracing::info!("Cached documentation for command: {}", command_name);

        Ok(article)
    }

    /// Deletes every cached fragment and returns how many were removed.
    pub async fn clear_cache(&self) -> Result<usize> {
        let count = self.cache.clear().await?;
        tracing::info!("Document cache cleared ({} files).", count);
        Ok(count)
    }

    /// Opens the command's page in the browser. The cache is not consulted.
    pub async fn open_in_browser(&self, command_name: &str) -> Result<String> {
        let url = self.command_url(command_name);
        self.opener.open(&url).await?;
        tracing::info!("Opened {} in default browser", url);
        Ok(format!("Opened {url} in default browser"))
    }
}
