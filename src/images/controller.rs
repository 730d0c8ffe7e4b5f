use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use uuid::Uuid;

use crate::{
    app::{
        models::{api_error::ApiError, multipart_from_request::MultipartFromRequest},
        util::multipart::multipart::get_multipart_form,
    },
    AppState,
};

use super::service;

#[debug_handler]
pub async fn colorize(
    State(state): State<AppState>,
    MultipartFromRequest(multipart): MultipartFromRequest,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let form = get_multipart_form(multipart).await?;

    match service::colorize(&form, &state).await {
        Ok(png) => {
            tracing::info!(%request_id, "colorize completed");
            Ok(png_response(png))
        }
        Err(e) => {
            tracing::error!(%request_id, "colorize failed ({}): {}", e.code, e.message);
            Err(e)
        }
    }
}

#[debug_handler]
pub async fn inpaint(
    State(state): State<AppState>,
    MultipartFromRequest(multipart): MultipartFromRequest,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let form = get_multipart_form(multipart).await?;

    match service::inpaint(&form, &state).await {
        Ok(png) => {
            tracing::info!(%request_id, "inpaint completed");
            Ok(png_response(png))
        }
        Err(e) => {
            tracing::error!(%request_id, "inpaint failed ({}): {}", e.code, e.message);
            Err(e)
        }
    }
}

#[debug_handler]
pub async fn grayscale(
    MultipartFromRequest(multipart): MultipartFromRequest,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let form = get_multipart_form(multipart).await?;

    match service::grayscale(&form) {
        Ok(png) => {
            tracing::info!(%request_id, "grayscale completed");
            Ok(png_response(png))
        }
        Err(e) => {
            tracing::error!(%request_id, "grayscale failed ({}): {}", e.code, e.message);
            Err(e)
        }
    }
}

fn png_response(png: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, mime::IMAGE_PNG.as_ref())], png).into_response()
}
