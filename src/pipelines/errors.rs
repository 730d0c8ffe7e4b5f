use axum::http::StatusCode;
use thiserror::Error;

use crate::app::models::api_error::ApiError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Pipeline backend unreachable: {0}")]
    Connection(String),

    #[error("Pipeline backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid pipeline response: {0}")]
    InvalidResponse(String),

    #[error("Pipeline returned no images")]
    NoImages,

    #[error("Unsupported device: {0}")]
    UnsupportedDevice(String),

    #[error("Pipeline is no longer accepting runs")]
    Closed,

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        ApiError {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}
