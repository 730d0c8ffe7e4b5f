use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

use super::util::image_utils::allowed_extensions_list;

#[derive(Debug)]
pub enum ImagesApiError {
    NoImageProvided,
    InvalidFileType,
    InvalidImage(String),
    ImageTooSmall { width: u32, height: u32 },
    InvalidParameter { name: String, value: String },
    EncodingFailed(String),
}

impl ImagesApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::NoImageProvided => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "No image file provided".to_string(),
            },
            Self::InvalidFileType => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Invalid file type. Allowed: {}", allowed_extensions_list()),
            },
            Self::InvalidImage(reason) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Invalid image file: {}", reason),
            },
            Self::ImageTooSmall { width, height } => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!(
                    "Image of {}x{} pixels is too small; width and height must be at least 8.",
                    width, height
                ),
            },
            Self::InvalidParameter { name, value } => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Invalid value for {}: '{}'.", name, value),
            },
            Self::EncodingFailed(reason) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Failed to encode image: {}", reason),
            },
        }
    }
}
