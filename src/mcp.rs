//! 4D documentation MCP implementation.
//!
//! Exposes the documentation service as three MCP tools:
//!
//! - `get_4d_command_docs`: cached or freshly fetched article for a command
//! - `clear_4d_docs_cache`: removes every cached article
//! - `open_4d_command_in_browser`: opens the command page in the browser
//!
//! Every failure is returned as a tool result flagged `is_error` with an
//! `Error: ...` message; no domain error surfaces as a protocol error.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use mcp_4d_docs::config::DocsConfig;
//! use mcp_4d_docs::mcp::DocFetcher;
//! use mcp_4d_docs::service::DocService;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = DocService::from_config(&DocsConfig::default())?;
//!     let fetcher = DocFetcher::new(Arc::new(service));
//!     Ok(())
//! }
//! ```

use rmcp::model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities};
use rmcp::{Error as McpError, ServerHandler, model::ServerInfo, schemars, tool};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{DocsError, Result};
use crate::service::DocService;

pub const SERVER_NAME: &str = "mcp-4d-docs";

/// MCP handler serving 4D command documentation.
#[derive(Clone)]
pub struct DocFetcher {
    service: Arc<DocService>,
}

/// Arguments of the tools that act on a single command.
///
/// The field is optional on the wire so that a missing name reaches the tool
/// and comes back as an error result; the published schema still lists it as
/// required.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CommandRequest {
    #[schemars(
        required,
        description = "The name of the 4D command (e.g., \"ACTIVITY SNAPSHOT\", \"ARRAY TO LIST\")"
    )]
    pub command_name: Option<String>,
}

impl CommandRequest {
    pub fn named(command_name: impl Into<String>) -> Self {
        Self {
            command_name: Some(command_name.into()),
        }
    }

    fn require_command_name(&self) -> Result<&str> {
        match self.command_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(DocsError::MissingArgument("command_name")),
        }
    }
}

/// Wraps an operation outcome into a tool result.
fn tool_result(tool: &str, outcome: Result<String>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => {
            tracing::error!("Tool {} failed: {}", tool, err);
            CallToolResult::error(vec![Content::text(format!("Error: {err}"))])
        }
    }
}

#[tool(tool_box)]
impl DocFetcher {
    pub fn new(service: Arc<DocService>) -> Self {
        Self { service }
    }

    #[tool(
        description = "Get documentation for a 4D command. Fetches the documentation from https://developer.4d.com/docs/commands/<command-name> and extracts the article content from the main tag. Results are cached locally for faster subsequent access."
    )]
    async fn get_4d_command_docs(
        &self,
        #[tool(aggr)] request: CommandRequest,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match request.require_command_name() {
            Ok(name) => self.service.fetch_documentation(name).await,
            Err(err) => Err(err),
        };
        Ok(tool_result("get_4d_command_docs", outcome))
    }

    #[tool(
        description = "Clear the local cache of 4D documentation. This removes all cached documentation files, forcing fresh fetches on subsequent requests."
    )]
    async fn clear_4d_docs_cache(&self) -> Result<CallToolResult, McpError> {
        let outcome = self
            .service
            .clear_cache()
            .await
            .map(|count| format!("Cleared {count} cached documentation file(s)"));
        Ok(tool_result("clear_4d_docs_cache", outcome))
    }

    #[tool(
        description = "Open a 4D command documentation page in the default web browser. This opens the URL https://developer.4d.com/docs/commands/<command-name> directly in your browser."
    )]
    async fn open_4d_command_in_browser(
        &self,
        #[tool(aggr)] request: CommandRequest,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match request.require_command_name() {
            Ok(name) => self.service.open_in_browser(name).await,
            Err(err) => Err(err),
        };
        Ok(tool_result("open_4d_command_in_browser", outcome))
    }
}

#[tool(tool_box)]
impl ServerHandler for DocFetcher {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "This server provides documentation for 4D language commands from developer.4d.com. \
                Use 'get_4d_command_docs' with a command name such as \"ARRAY TO LIST\" to retrieve its documentation, \
                'open_4d_command_in_browser' to open the page in a browser, and 'clear_4d_docs_cache' to force fresh fetches. \
                Fetched documentation is cached locally."
                    .to_string(),
            ),
        }
    }
}
