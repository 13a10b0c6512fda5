use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use watermark_core::PipelineError;

/// Body of every failed watermark request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

/// Maps pipeline failures to `500 { message, error }`.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: "Internal Server Error".to_string(),
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_error_response_shape() {
        let err = ApiError::from(PipelineError::InvalidInput(
            "Either files or URLs must be provided.".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Internal Server Error");
        assert_eq!(json["error"], "Either files or URLs must be provided.");
    }
}
