use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::detect::{CursorContext, clean_command_name, detect_command_name, validate_command_name};
use crate::error::Result;
use crate::viewer::EditorHost;

/// Editor host backed by the terminal.
///
/// The "cursor" is a line of source text and a column passed on the command
/// line, prompts read stdin, and rendered pages are written to `output`.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    words: Vec<String>,
    line: Option<String>,
    column: usize,
    output: PathBuf,
}

impl TerminalHost {
    pub fn new(words: Vec<String>, line: Option<String>, column: usize, output: PathBuf) -> Self {
        Self {
            words,
            line,
            column,
            output,
        }
    }
}

#[async_trait]
impl EditorHost for TerminalHost {
    async fn detect_command_name(&self) -> Option<String> {
        if !self.words.is_empty() {
            let name = clean_command_name(&self.words.join(" "));
            return (!name.is_empty()).then_some(name);
        }
        let line = self.line.as_deref()?;
        detect_command_name(&CursorContext {
            line,
            column: self.column,
            selection: None,
        })
    }

    async fn prompt_for_command_name(&self) -> Option<String> {
        let mut stderr = tokio::io::stderr();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            stderr
                .write_all(b"Enter 4D command name (e.g., ACTIVITY SNAPSHOT or ARRAY TO LIST): ")
                .await
                .ok()?;
            stderr.flush().await.ok()?;

            let input = lines.next_line().await.ok()??;
            match validate_command_name(&input) {
                Ok(name) => return Some(name),
                Err(reason) => {
                    stderr.write_all(format!("{reason}\n").as_bytes()).await.ok()?;
                }
            }
        }
    }

    async fn render_document(&self, title: &str, html: &str) -> Result<()> {
        fs::write(&self.output, html).await?;
        tracing::debug!("Rendered {:?} to {:?}", title, self.output);
        Ok(())
    }

    fn show_info(&self, message: &str) {
        println!("{message}");
    }

    fn show_error(&self, message: &str) {
        eprintln!("{message}");
    }
}
