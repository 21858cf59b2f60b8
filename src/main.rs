use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use mcp_4d_docs::browser::{SystemOpener, UrlOpener};
use mcp_4d_docs::config::DocsConfig;
use mcp_4d_docs::naming::{DOCS_BASE_URL, command_slug};
use mcp_4d_docs::server;
use mcp_4d_docs::service::DocService;
use mcp_4d_docs::terminal::TerminalHost;
use mcp_4d_docs::viewer::EditorCommands;

#[derive(Parser, Debug)]
#[command(version, about = "4D Command Documentation MCP Server")]
struct Cli {
    /// Directory holding cached documentation (defaults to the platform cache directory)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Root URL of the command documentation pages
    #[arg(long, global = true, default_value = DOCS_BASE_URL)]
    docs_base_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server (the default when no subcommand is given)
    Serve {
        /// Type of server to run
        #[arg(short, long, value_enum, default_value_t = ServerType::Stdio)]
        server_type: ServerType,

        /// Address for the SSE server
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        address: String,
    },
    /// Print the documentation fragment for a command
    Docs {
        #[arg(required = true, num_args = 1..)]
        command_name: Vec<String>,
    },
    /// Open a command's documentation page in the default browser
    Open {
        #[arg(required = true, num_args = 1..)]
        command_name: Vec<String>,
    },
    /// Delete all cached documentation
    ClearCache,
    /// Render a command's documentation page to an HTML file
    View {
        /// Command name; detected from --line/--column or prompted for when omitted
        command_name: Vec<String>,

        /// Source line to detect the command name from
        #[arg(long)]
        line: Option<String>,

        /// Cursor position in --line, in characters
        #[arg(long, default_value_t = 0)]
        column: usize,

        /// Where to write the rendered page
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the rendered page in the default browser
        #[arg(long)]
        open: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ServerType {
    /// Start an SSE server
    Sse,
    /// Start a stdio server
    Stdio,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DocsConfig {
        cache_dir: cli.cache_dir,
        docs_base_url: cli.docs_base_url,
    };

    let command = cli.command.unwrap_or(Command::Serve {
        server_type: ServerType::Stdio,
        address: "127.0.0.1:8080".to_string(),
    });

    if !matches!(command, Command::Serve { .. }) {
        server::init_stderr_logging("warn");
    }

    let service = Arc::new(DocService::from_config(&config)?);

    match command {
        Command::Serve {
            server_type: ServerType::Sse,
            address,
        } => {
            println!("Starting SSE server on {}", address);
            server::start_sse_server(&address, service).await?;
        }
        Command::Serve {
            server_type: ServerType::Stdio,
            ..
        } => {
            server::start_stdio_server(service).await?;
        }
        Command::Docs { command_name } => {
            let docs = service.fetch_documentation(&command_name.join(" ")).await?;
            println!("{docs}");
        }
        Command::Open { command_name } => {
            println!("{}", service.open_in_browser(&command_name.join(" ")).await?);
        }
        Command::ClearCache => {
            let count = service.clear_cache().await?;
            println!("Cleared {count} cached documentation file(s)");
        }
        Command::View {
            command_name,
            line,
            column,
            output,
            open,
        } => {
            let output = output.unwrap_or_else(|| {
                let slug = command_slug(&command_name.join(" "));
                let stem = if slug.is_empty() { "view".to_string() } else { slug };
                std::env::temp_dir().join(format!("mcp-4d-docs-{stem}.html"))
            });
            let host = TerminalHost::new(command_name, line, column, output.clone());
            let mut commands = EditorCommands::new(host, service);

            if let Some(name) = commands.open_in_panel().await {
                println!("Documentation for {name} written to {}", output.display());
                if open {
                    let url = format!("file://{}", output.display());
                    if let Err(err) = SystemOpener.open(&url).await {
                        eprintln!("{err}");
                    }
                }
            }
            commands.dispose();
        }
    }

    Ok(())
}
