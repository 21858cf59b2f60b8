use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{DocsError, Result};

/// Hands a URL to something that can display it.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

/// Program and arguments that open `url` on `os`.
pub(crate) fn opener_command(os: &str, url: &str) -> (&'static str, Vec<String>) {
    match os {
        "macos" => ("open", vec![url.to_string()]),
        // Bypasses cmd, which splits its arguments at `&` and `|`.
        "windows" => (
            "rundll32",
            vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()],
        ),
        _ => ("xdg-open", vec![url.to_string()]),
    }
}

#[async_trait]
impl UrlOpener for SystemOpener {
    async fn open(&self, url: &str) -> Result<()> {
        let (program, args) = opener_command(std::env::consts::OS, url);
        tracing::debug!("Launching {} {:?}", program, args);

        let output = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|e| DocsError::BrowserOpen(format!("{program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocsError::BrowserOpen(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
