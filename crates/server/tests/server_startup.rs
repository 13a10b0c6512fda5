use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config that needs no Google credentials
fn minimal_config(port: u16, workspace: &std::path::Path) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[google]
project_id = "startup-test"
anonymous = true

[storage]
bucket = "startup-bucket"

[workspace]
dir = "{}"
"#,
        port,
        workspace.display()
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn command(config_path: &std::path::Path) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_watermarkd"));
    command
        .env("WATERMARK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .env_remove("PORT")
        .env_remove("GOOGLE_CLOUD_BUCKET_NAME")
        .env_remove("GOOGLE_CLOUD_PROJECT_ID")
        .env_remove("GOOGLE_CLOUD_KEYFILE")
        .kill_on_drop(true);
    command
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    command(config_path).spawn().expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_health_endpoint() {
    let port = get_available_port();
    let workspace = TempDir::new().unwrap();
    let config = write_config(&minimal_config(port, &workspace.path().join("uploads")));

    let mut server = spawn_server(config.path()).await;

    assert!(
        wait_for_server(port, 100).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    // The working directory is created at startup
    assert!(workspace.path().join("uploads").is_dir());

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_endpoint_returns_sanitized() {
    let port = get_available_port();
    let workspace = TempDir::new().unwrap();
    let config = write_config(&minimal_config(port, workspace.path()));

    let mut server = spawn_server(config.path()).await;

    assert!(
        wait_for_server(port, 100).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/config", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["server"]["port"], port);
    assert_eq!(json["storage"]["bucket"], "startup-bucket");
    assert_eq!(json["google"]["anonymous"], true);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        command(std::path::Path::new("/nonexistent/config.toml")).output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_missing_bucket_exits_with_error() {
    let config = write_config(
        r#"
[server]
port = 8080

[google]
anonymous = true
"#,
    );

    let result = timeout(Duration::from_secs(5), command(config.path()).output())
        .await
        .expect("Command timed out")
        .expect("Failed to execute command");

    assert!(!result.status.success());
}
