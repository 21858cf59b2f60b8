use rmcp::ServiceExt;
use rmcp::transport::sse_server::SseServer;
use rmcp::transport::stdio;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::mcp::DocFetcher;
use crate::service::DocService;

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Logs to stderr without colours; stdout stays free for protocol or command output.
pub fn init_stderr_logging(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

// start sse server
pub async fn start_sse_server(addr: &str, service: Arc<DocService>) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter("debug"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MCP SSE server on {}", addr);

    let ct = SseServer::serve(addr.parse()?)
        .await?
        .with_service(move || DocFetcher::new(service.clone()));

    tokio::signal::ctrl_c().await?;
    ct.cancel();
    Ok(())
}

// start stdio server
pub async fn start_stdio_server(service: Arc<DocService>) -> anyhow::Result<()> {
    init_stderr_logging("debug");

    tracing::info!("MCP 4D Docs server running on stdio");

    let server = DocFetcher::new(service)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    server.waiting().await?;
    Ok(())
}
