//! Editor-facing presentation: a host abstraction for UI primitives, a
//! reusable documentation panel, and the two editor commands built on them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::extract::escape_html;
use crate::service::DocService;

/// Stylesheet of the documentation site, linked from rendered pages.
pub const SITE_STYLESHEET: &str = "https://developer.4d.com/docs/assets/css/styles.ae3169d2.css";

/// UI primitives supplied by whatever hosts the editor commands.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Command name at the cursor or in the selection, if any.
    async fn detect_command_name(&self) -> Option<String>;
    /// Asks the user for a command name; `None` means cancelled.
    async fn prompt_for_command_name(&self) -> Option<String>;
    /// Displays a full HTML page under `title`.
    async fn render_document(&self, title: &str, html: &str) -> Result<()>;
    fn show_info(&self, message: &str);
    fn show_error(&self, message: &str);
}

pub fn panel_title(command_name: &str) -> String {
    format!("4D: {command_name}")
}

/// A single documentation panel reused across invocations.
#[derive(Debug, Default)]
pub struct DocPanel {
    title: Option<String>,
}

impl DocPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.title.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Shows documentation for `command_name`, reusing the panel if open.
    ///
    /// The loading page is rendered first. A lookup failure renders the error
    /// page and is reported through the host; only rendering failures are
    /// returned.
    pub async fn show(
        &mut self,
        host: &dyn EditorHost,
        service: &DocService,
        command_name: &str,
    ) -> Result<()> {
        if self.is_open() {
            tracing::debug!("Reusing documentation panel for {}", command_name);
        }
        let title = panel_title(command_name);
        self.title = Some(title.clone());

        host.render_document(&title, &loading_page(command_name)).await?;

        match service.fetch_documentation(command_name).await {
            Ok(article) => {
                host.render_document(&title, &document_page(command_name, &article))
                    .await
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!("Failed to load documentation for {}: {}", command_name, message);
                host.render_document(&title, &error_page(command_name, &message))
                    .await?;
                host.show_error(&format!(
                    "Failed to load documentation for {command_name}: {message}"
                ));
                Ok(())
            }
        }
    }

    pub fn dispose(&mut self) {
        self.title = None;
    }
}

fn page(command_name: &str, head_extra: &str, style: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>{head_extra}
  <style>
    body {{
      font-family: system-ui, sans-serif;
      padding: 20px;
      line-height: 1.6;
    }}
{style}
  </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(&panel_title(command_name)),
    )
}

pub fn loading_page(command_name: &str) -> String {
    page(
        command_name,
        "",
        "    .loading { display: flex; align-items: center; justify-content: center; min-height: 200px; font-size: 18px; }",
        &format!(
            r#"  <div class="loading">Loading documentation for {}...</div>"#,
            escape_html(command_name)
        ),
    )
}

pub fn error_page(command_name: &str, message: &str) -> String {
    page(
        command_name,
        "",
        "    .error { color: #a1260d; border: 1px solid #be1100; padding: 15px; border-radius: 4px; }\n    h2 { margin-top: 0; }",
        &format!(
            r#"  <div class="error">
    <h2>Error Loading Documentation</h2>
    <p><strong>Command:</strong> {}</p>
    <p><strong>Error:</strong> {}</p>
  </div>"#,
            escape_html(command_name),
            escape_html(message)
        ),
    )
}

/// Full page around an extracted article fragment.
pub fn document_page(command_name: &str, article_html: &str) -> String {
    page(
        command_name,
        &format!("\n  <link rel=\"stylesheet\" href=\"{SITE_STYLESHEET}\">"),
        "    article { max-width: 100%; }\n    pre { padding: 10px; border-radius: 4px; overflow-x: auto; }\n    table { border-collapse: collapse; width: 100%; margin: 1em 0; }\n    table th, table td { border: 1px solid #ccc; padding: 8px; text-align: left; }\n    img { max-width: 100%; height: auto; }",
        &format!("  <h1>{}</h1>\n  {}", escape_html(command_name), article_html),
    )
}

/// The editor commands: open in browser, open in panel.
pub struct EditorCommands<H> {
    host: H,
    service: Arc<DocService>,
    panel: DocPanel,
}

impl<H: EditorHost> EditorCommands<H> {
    pub fn new(host: H, service: Arc<DocService>) -> Self {
        Self {
            host,
            service,
            panel: DocPanel::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn panel(&self) -> &DocPanel {
        &self.panel
    }

    async fn resolve_command_name(&self) -> Option<String> {
        match self.host.detect_command_name().await {
            Some(name) => Some(name),
            None => self.host.prompt_for_command_name().await,
        }
    }

    /// Returns the command handled, or `None` when the user cancelled.
    pub async fn open_in_browser(&self) -> Option<String> {
        let command_name = self.resolve_command_name().await?;

        match self.service.open_in_browser(&command_name).await {
            Ok(_) => self
                .host
                .show_info(&format!("Opened documentation for {command_name}")),
            Err(err) => self
                .host
                .show_error(&format!("Failed to open documentation: {err}")),
        }
        Some(command_name)
    }

    /// Returns the command handled, or `None` when the user cancelled.
    pub async fn open_in_panel(&mut self) -> Option<String> {
        let command_name = self.resolve_command_name().await?;

        if let Err(err) = self
            .panel
            .show(&self.host, &self.service, &command_name)
            .await
        {
            self.host
                .show_error(&format!("Failed to load documentation: {err}"));
        }
        Some(command_name)
    }

    pub fn dispose(&mut self) {
        self.panel.dispose();
    }
}
