use mockito::Server;
use rmcp::model::CallToolRequestParam;
use rmcp::transport::TokioChildProcess;
use rmcp::ServiceExt;
use std::path::Path;
use std::process::Output;
use tempfile::tempdir;
use tokio::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_mcp-4d-docs");

const PAGE: &str = r#"<!DOCTYPE html><html><body>
    <main><article>
        <nav class="breadcrumbs"><a href="/docs/commands">Commands</a></nav>
        <h1>ARRAY TO LIST</h1>
        <p>See <a href="/docs/other-page">LIST TO ARRAY</a>.</p>
    </article></main>
    </body></html>"#;

async fn run(cache_dir: &Path, docs_base_url: &str, args: &[&str]) -> Output {
    Command::new(BIN)
        .arg("--cache-dir")
        .arg(cache_dir)
        .arg("--docs-base-url")
        .arg(docs_base_url)
        .args(args)
        .output()
        .await
        .expect("Failed to run binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[tokio::test]
async fn test_clear_cache_command() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("0123456789abcdef0123456789abcdef.html"), "a").unwrap();
    std::fs::write(dir.path().join("fedcba9876543210fedcba9876543210.html"), "b").unwrap();
    std::fs::write(dir.path().join("keep.txt"), "c").unwrap();

    let output = run(dir.path(), "http://127.0.0.1:9", &["clear-cache"]).await;

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Cleared 2 cached documentation file(s)");
    assert!(dir.path().join("keep.txt").exists());
}

#[tokio::test]
async fn test_clear_cache_missing_directory() {
    let dir = tempdir().unwrap();
    let cache_dir = dir.path().join("never-created");

    let output = run(&cache_dir, "http://127.0.0.1:9", &["clear-cache"]).await;

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Cleared 0 cached documentation file(s)");
    assert!(!cache_dir.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_docs_command_fetches_once() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/array-to-list")
        .match_header("user-agent", concat!("mcp-4d-docs/", env!("CARGO_PKG_VERSION")))
        .with_status(200)
        .with_body(PAGE)
        .expect(1)
        .create_async()
        .await;
    let dir = tempdir().unwrap();

    let first = run(dir.path(), &server.url(), &["docs", "ARRAY", "TO", "LIST"]).await;
    let second = run(dir.path(), &server.url(), &["docs", "ARRAY TO LIST"]).await;
    m.assert_async().await;

    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));
    let docs = stdout(&first);
    assert!(docs.contains("<h1>ARRAY TO LIST</h1>"));
    assert!(docs.contains(&format!(r#"href="{}/docs/other-page""#, server.url())));
    assert!(!docs.contains("breadcrumbs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_docs_command_reports_http_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/missing-command")
        .with_status(404)
        .create_async()
        .await;
    let dir = tempdir().unwrap();

    let output = run(dir.path(), &server.url(), &["docs", "MISSING COMMAND"]).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("HTTP error! status: 404"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_view_command_detects_from_line() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/array-to-list")
        .with_status(200)
        .with_body(PAGE)
        .create_async()
        .await;
    let dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let output_file = out_dir.path().join("page.html");

    let output = run(
        dir.path(),
        &server.url(),
        &[
            "view",
            "--line",
            "  ARRAY TO LIST($colors; \"Colors\")",
            "--column",
            "9",
            "--output",
            output_file.to_str().unwrap(),
        ],
    )
    .await;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Documentation for ARRAY TO LIST written to"));
    let page = std::fs::read_to_string(&output_file).unwrap();
    assert!(page.contains("<title>4D: ARRAY TO LIST</title>"));
    assert!(page.contains("<h1>ARRAY TO LIST</h1>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stdio_server_tools() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("0123456789abcdef0123456789abcdef.html"), "a").unwrap();

    let client = ()
        .serve(
            TokioChildProcess::new(
                Command::new(BIN)
                    .arg("serve")
                    .arg("--cache-dir")
                    .arg(dir.path())
                    .arg("--docs-base-url")
                    .arg("http://127.0.0.1:9"),
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let tools = client.list_tools(Default::default()).await.unwrap();
    assert_eq!(tools.tools.len(), 3);

    let result = client
        .call_tool(CallToolRequestParam {
            name: "clear_4d_docs_cache".into(),
            arguments: None,
        })
        .await
        .unwrap();
    let text = result.content[0].as_text().unwrap().text.clone();
    assert_eq!(text, "Cleared 1 cached documentation file(s)");

    let result = client
        .call_tool(CallToolRequestParam {
            name: "get_4d_command_docs".into(),
            arguments: serde_json::json!({ "command_name": "" }).as_object().cloned(),
        })
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        result.content[0].as_text().unwrap().text,
        "Error: command_name is required"
    );

    let result = client
        .call_tool(CallToolRequestParam {
            name: "get_4d_command_docs".into(),
            arguments: None,
        })
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        result.content[0].as_text().unwrap().text,
        "Error: command_name is required"
    );

    client.cancel().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stdio_server_starts_with_unusable_cache_dir() {
    let dir = tempdir().unwrap();
    let home = dir.path().join("home-is-a-file");
    std::fs::write(&home, "x").unwrap();

    let client = ()
        .serve(
            TokioChildProcess::new(
                Command::new(BIN)
                    .env("HOME", &home)
                    .env_remove("LOCALAPPDATA")
                    .arg("serve")
                    .arg("--docs-base-url")
                    .arg("http://127.0.0.1:9"),
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let tools = client.list_tools(Default::default()).await.unwrap();
    assert_eq!(tools.tools.len(), 3);

    let result = client
        .call_tool(CallToolRequestParam {
            name: "get_4d_command_docs".into(),
            arguments: serde_json::json!({ "command_name": "TRACE" }).as_object().cloned(),
        })
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    let text = result.content[0].as_text().unwrap().text.clone();
    assert!(text.starts_with("Error: Filesystem error:"), "{text}");

    client.cancel().await.unwrap();
}
