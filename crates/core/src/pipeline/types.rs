use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use super::workspace::WorkingFiles;

/// Where the video and overlay of a request come from.
#[derive(Debug)]
pub enum JobInput {
    /// Both files were uploaded and already written to disk.
    Uploaded(WorkingFiles),
    /// Both files must be downloaded first.
    Remote { video_url: String, image_url: String },
}

impl JobInput {
    /// Picks the input variant for a request.
    ///
    /// `uploaded` is `Some` only when both file parts were received. Uploaded
    /// files win over URLs; otherwise both URLs must be present and non-empty.
    pub fn resolve(
        uploaded: Option<WorkingFiles>,
        video_url: Option<String>,
        image_url: Option<String>,
    ) -> Result<Self, PipelineError> {
        if let Some(files) = uploaded {
            return Ok(Self::Uploaded(files));
        }

        let video_url = video_url.filter(|u| !u.is_empty());
        let image_url = image_url.filter(|u| !u.is_empty());
        match (video_url, image_url) {
            (Some(video_url), Some(image_url)) => Ok(Self::Remote {
                video_url,
                image_url,
            }),
            _ => Err(PipelineError::missing_input()),
        }
    }
}

/// Successful result of a watermark request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkOutcome {
    /// Public URL of the watermarked video.
    pub url: String,
}

/// Body of the trigger endpoint, republished verbatim to the topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Result of publishing a trigger request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Workspace;

    #[test]
    fn test_uploaded_files_win_over_urls() {
        let files = Workspace::new("uploads").allocate();
        let input = JobInput::resolve(
            Some(files),
            Some("https://cdn.example.com/v.mp4".to_string()),
            Some("https://cdn.example.com/i.png".to_string()),
        )
        .unwrap();
        assert!(matches!(input, JobInput::Uploaded(_)));
    }

    #[test]
    fn test_both_urls() {
        let input = JobInput::resolve(
            None,
            Some("https://cdn.example.com/v.mp4".to_string()),
            Some("https://cdn.example.com/i.png".to_string()),
        )
        .unwrap();
        match input {
            JobInput::Remote {
                video_url,
                image_url,
            } => {
                assert_eq!(video_url, "https://cdn.example.com/v.mp4");
                assert_eq!(image_url, "https://cdn.example.com/i.png");
            }
            other => panic!("unexpected input: {other:?}"),
        }
    }

    #[test]
    fn test_missing_or_empty_urls_are_invalid() {
        let cases = [
            (None, None),
            (Some("https://cdn.example.com/v.mp4"), None),
            (None, Some("https://cdn.example.com/i.png")),
            (Some(""), Some("https://cdn.example.com/i.png")),
            (Some("https://cdn.example.com/v.mp4"), Some("")),
        ];
        for (video, image) in cases {
            let err = JobInput::resolve(
                None,
                video.map(str::to_string),
                image.map(str::to_string),
            )
            .unwrap_err();
            assert!(matches!(err, PipelineError::InvalidInput(_)));
            assert_eq!(err.to_string(), "Either files or URLs must be provided.");
        }
    }

    #[test]
    fn test_trigger_request_omits_absent_fields() {
        let request = TriggerRequest {
            video_url: Some("https://cdn.example.com/v.mp4".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"videoUrl":"https://cdn.example.com/v.mp4"}"#);
    }

    #[test]
    fn test_trigger_request_reads_camel_case() {
        let request: TriggerRequest = serde_json::from_str(
            r#"{"videoPath":"/tmp/v.mp4","imagePath":"/tmp/i.png","extra":1}"#,
        )
        .unwrap();
        assert_eq!(request.video_path.as_deref(), Some("/tmp/v.mp4"));
        assert_eq!(request.image_path.as_deref(), Some("/tmp/i.png"));
        assert!(request.video_url.is_none());
    }
}
