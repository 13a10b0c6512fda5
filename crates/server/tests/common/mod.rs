//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected, so the HTTP layer can be exercised
//! without ffmpeg, network access or Google Cloud.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use watermark_core::testing::{fixtures, MockCompositor, MockFetcher, MockNotifier, MockUploader};
use watermark_core::{PipelineConfig, WatermarkPipeline, Workspace};
use watermark_server::state::AppState;

pub const BUCKET: &str = "test-bucket";

pub const BOUNDARY: &str = "----watermark-test-boundary";

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_upload_url() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/watermark/upload-url", json!({
///         "videoUrl": "https://cdn.example.com/clip.mp4",
///         "imageUrl": "https://cdn.example.com/logo.png"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    pub fetcher: Arc<MockFetcher>,
    pub compositor: Arc<MockCompositor>,
    pub uploader: Arc<MockUploader>,
    pub notifier: Arc<MockNotifier>,
    /// Working directory of the pipeline
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// One part of a multipart form.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixtures::config(BUCKET, temp_dir.path());

        let fetcher = Arc::new(MockFetcher::new());
        let compositor = Arc::new(MockCompositor::new());
        let uploader = Arc::new(MockUploader::with_bucket(BUCKET));
        let notifier = Arc::new(MockNotifier::new());

        let workspace = Workspace::new(temp_dir.path());
        workspace
            .ensure_exists()
            .await
            .expect("Failed to create workspace");

        let pipeline = WatermarkPipeline::new(
            PipelineConfig::from(&config),
            workspace,
            fetcher.clone(),
            compositor.clone(),
            uploader.clone(),
            notifier.clone(),
        );

        let state = Arc::new(AppState::new(config, Arc::new(pipeline)));
        let router = watermark_server::api::create_router(state);

        Self {
            router,
            fetcher,
            compositor,
            uploader,
            notifier,
            temp_dir,
        }
    }

    /// Names of the files currently in the working directory.
    pub fn workspace_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.temp_dir.path())
            .expect("Failed to read workspace")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with an arbitrary content type and body.
    pub async fn post_bytes(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();
        self.send(request).await
    }

    /// Send a multipart/form-data POST request.
    pub async fn post_multipart(&self, path: &str, parts: &[Part<'_>]) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
