//! Watermark job endpoints.

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use watermark_core::{PipelineError, TriggerRequest, WatermarkOutcome, WorkingFiles};

use super::error::ApiError;
use crate::state::AppState;

/// Body of `POST /upload-url`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub message_id: String,
    pub message: String,
    pub data: TriggerRequest,
}

#[derive(Debug, Serialize)]
pub struct TriggerFailure {
    pub message: String,
    pub data: TriggerRequest,
}

/// POST /api/watermark/upload
///
/// Multipart form with `video` and `image` file parts and optional
/// `videoUrl`/`imageUrl` text parts. File parts stream straight to the
/// working directory. A body that is not multipart is read like the
/// `upload-url` JSON body.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<WatermarkOutcome>, ApiError> {
    let pipeline = state.pipeline();

    if !is_multipart(request.headers()) {
        let body = Bytes::from_request(request, &state).await.map_err(|e| {
            pipeline.reject(PipelineError::InvalidInput(format!(
                "Failed to read request body: {}",
                e
            )))
        })?;
        let request = parse_url_request(&body);
        let outcome = pipeline
            .handle(None, request.video_url, request.image_url)
            .await?;
        return Ok(Json(outcome));
    }

    let multipart = Multipart::from_request(request, &state)
        .await
        .map_err(|e| {
            pipeline.reject(PipelineError::InvalidInput(format!(
                "Failed to read multipart body: {}",
                e
            )))
        })?;

    let form = read_form(multipart, pipeline.workspace().allocate())
        .await
        .map_err(|e| pipeline.reject(e))?;

    let outcome = pipeline
        .handle(form.files, form.video_url, form.image_url)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/watermark/upload-url
///
/// JSON `{ videoUrl, imageUrl }`. A body that does not parse is treated as
/// empty input.
pub async fn upload_url(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WatermarkOutcome>, ApiError> {
    let request = parse_url_request(&body);

    let outcome = state
        .pipeline()
        .handle(None, request.video_url, request.image_url)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/watermark/trigger-watermark-process
///
/// Publishes the request body to the notification topic. Nothing is
/// processed here.
pub async fn trigger_watermark_process(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let request: TriggerRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        if !body.is_empty() {
            warn!("Unparseable trigger body: {}", e);
        }
        TriggerRequest::default()
    });

    match state.pipeline().trigger(request.clone()).await {
        Ok(outcome) => Json(TriggerResponse {
            message_id: outcome.message_id,
            message: "Watermark process initiated".to_string(),
            data: request,
        })
        .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(TriggerFailure {
                message: "Failed to initiate watermark process".to_string(),
                data: request,
            }),
        )
            .into_response(),
    }
}

/// Fields received from an upload form.
struct UploadForm {
    /// Present only when both file parts arrived.
    files: Option<WorkingFiles>,
    video_url: Option<String>,
    image_url: Option<String>,
}

async fn read_form(
    mut multipart: Multipart,
    files: WorkingFiles,
) -> Result<UploadForm, PipelineError> {
    let mut has_video = false;
    let mut has_image = false;
    let mut video_url: Option<String> = None;
    let mut image_url: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "video" => {
                save_field(field, files.video()).await?;
                has_video = true;
            }
            "image" => {
                save_field(field, files.image()).await?;
                has_image = true;
            }
            "videoUrl" => video_url = Some(read_text(field, &name).await?),
            "imageUrl" => image_url = Some(read_text(field, &name).await?),
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    // A lone file part is discarded here; the working-file guard removes it.
    Ok(UploadForm {
        files: (has_video && has_image).then_some(files),
        video_url,
        image_url,
    })
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, PipelineError> {
    field.text().await.map_err(|e| {
        warn!(field = %name, "Failed to read form field: {}", e);
        multipart_error(e)
    })
}

fn multipart_error(e: MultipartError) -> PipelineError {
    PipelineError::InvalidInput(format!("Failed to read multipart body: {}", e))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

fn parse_url_request(body: &[u8]) -> UploadUrlRequest {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        if !body.is_empty() {
            warn!("Unparseable watermark request body: {}", e);
        }
        UploadUrlRequest::default()
    })
}

async fn save_field(mut field: Field<'_>, dest: &Path) -> Result<u64, PipelineError> {
    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(PipelineError::Workspace)?;
    let mut written: u64 = 0;

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                file.write_all(&chunk)
                    .await
                    .map_err(PipelineError::Workspace)?;
                written += chunk.len() as u64;
            }
            Ok(None) => break,
            Err(e) => {
                return Err(PipelineError::InvalidInput(format!(
                    "Failed to read upload: {}",
                    e
                )))
            }
        }
    }

    file.flush().await.map_err(PipelineError::Workspace)?;
    debug!(bytes = written, dest = %dest.display(), "Stored uploaded file");
    Ok(written)
}
