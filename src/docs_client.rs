use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT as USER_AGENT_HEADER};
use url::Url;

use crate::error::{DocsError, Result};
use crate::extract::extract_article;
use crate::naming::{DOCS_BASE_URL, SITE_ORIGIN, command_url_with_base};

/// Identifies this tool to the documentation site.
pub const USER_AGENT: &str = concat!("mcp-4d-docs/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the 4D command documentation pages.
#[derive(Debug, Clone)]
pub struct DocsClient {
    client: Client,
    base_url: String,
    site_origin: String,
}

impl Default for DocsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DocsClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DOCS_BASE_URL.to_string(),
            site_origin: SITE_ORIGIN.to_string(),
        }
    }

    /// Client against another documentation root. Relative `/docs/` links are
    /// made absolute against the origin of `base_url`.
    pub fn new_with_base_url(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            site_origin: parsed.origin().ascii_serialization(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    pub fn command_url(&self, command_name: &str) -> String {
        command_url_with_base(&self.base_url, command_name)
    }

    /// Downloads the raw page for a command.
    pub async fn fetch_page(&self, command_name: &str) -> Result<String> {
        let url = self.command_url(command_name);

        tracing::info!("Fetching documentation from: {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(ACCEPT, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Documentation request for {} failed with {}", url, status);
            return Err(DocsError::Fetch(status));
        }

        Ok(response.text().await?)
    }

    /// Downloads a command page and extracts its article fragment.
    pub async fn fetch_article(&self, command_name: &str) -> Result<String> {
        let html = self.fetch_page(command_name).await?;
        extract_article(&html, command_name, &self.site_origin)
    }
}
