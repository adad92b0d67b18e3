#![cfg(feature = "cli")]
use std::process::{Output, Stdio};
use std::str;

use mockito::{Server, ServerGuard};
use rust_decimal::Decimal;
use tokio::{io::AsyncWriteExt, process::Command};

const THREE_CLOSES: &str = r#"{"data": [
    {"timestamp": "2024-03-05", "close": "100.00"},
    {"timestamp": "2024-03-06", "close": "110.00"},
    {"timestamp": "2024-03-07", "close": "99.00"}
]}"#;

async fn price_service(status: usize, body: &str) -> ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/stocks/")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
    server
}

fn dashboard(server: &ServerGuard) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_price-dashboard"));
    cmd.env_remove("PRICE_DASHBOARD_URL")
        .env("RUST_LOG", "off")
        .args(["--base-url", &server.url()]);
    cmd
}

async fn run(mut cmd: Command, args: &[&str]) -> Output {
    cmd.args(args).output().await.unwrap()
}

fn stdout(output: &Output) -> &str {
    str::from_utf8(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> &str {
    str::from_utf8(&output.stderr).unwrap()
}

#[tokio::test]
async fn test_show_json() -> Result<(), Box<dyn std::error::Error>> {
    let server = price_service(200, THREE_CLOSES).await;
    let output = run(dashboard(&server), &["show", "--symbol", "MSFT", "--json"]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(stdout(&output))?;
    assert_eq!(report["asset"]["symbol"], "MSFT");
    assert_eq!(report["status"]["state"], "ready");
    assert_eq!(report["points"], 3);
    assert_eq!(report["direction"], "down");
    let change: Decimal = report["change_percent"].as_str().unwrap().parse()?;
    assert_eq!(change, Decimal::new(-100, 2));
    assert!(report["range"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_show_brush_in_range() {
    let server = price_service(200, THREE_CLOSES).await;
    let output = run(dashboard(&server), &["show", "--brush", "0", "1"]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("Apple Inc. (AAPL) [stock]\n"), "{text}");
    assert!(text.contains("  change: -1.00%"), "{text}");
    assert!(
        text.contains("  selection: 100.00 -> 110.00, change 10.00 (10.00%)"),
        "{text}"
    );
}

#[tokio::test]
async fn test_show_brush_out_of_range_fails() {
    let server = price_service(200, THREE_CLOSES).await;
    let output = run(dashboard(&server), &["show", "--brush", "0", "9"]).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("brush selection rejected"), "{err}");
    assert!(err.contains("out of bounds"), "{err}");
    assert!(stdout(&output).is_empty());
}

#[tokio::test]
async fn test_show_unavailable_service_fails() {
    let server = price_service(500, "quote feed down").await;
    let output = run(dashboard(&server), &["show"]).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("is unavailable"), "{err}");
    assert!(err.contains("quote feed down"), "{err}");
}

#[tokio::test]
async fn test_show_unknown_symbol_fails() {
    let server = price_service(200, THREE_CLOSES).await;
    let output = run(dashboard(&server), &["show", "--symbol", "DOGE"]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown asset symbol 'DOGE'"));
}

#[tokio::test]
async fn test_interactive_reports_errors_and_continues() {
    let server = price_service(200, THREE_CLOSES).await;
    let mut child = dashboard(&server)
        .arg("interactive")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin
        .write_all(b"select DOGE\nbuy AAPL\nbrush 0\nassets\nquit\n")
        .await
        .unwrap();
    drop(stdin);
    let output = child.wait_with_output().await.unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("error: Selection error: unknown asset symbol 'DOGE'"), "{err}");
    assert!(err.contains("error: unknown command 'buy'"), "{err}");
    assert!(err.contains("error: usage: brush START END"), "{err}");
    // The session survived all three and still listed the assets.
    let out = stdout(&output);
    assert!(out.contains("* AAPL"), "{out}");
    assert!(out.contains("  GOOGL"), "{out}");
}

#[tokio::test]
async fn test_assets_lists_configuration() {
    let server = price_service(200, THREE_CLOSES).await;
    let output = run(dashboard(&server), &["assets"]).await;

    assert!(output.status.success());
    let lines: Vec<_> = stdout(&output).lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("* AAPL"));
    assert!(lines[2].contains("Microsoft Corporation"));
}
