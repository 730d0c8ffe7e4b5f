use image::RgbImage;

use crate::{
    app::{
        models::api_error::ApiError, util::multipart::models::multipart_form::MultipartForm,
    },
    AppState,
};

use super::{
    dtos::{colorize_dto::ColorizeDto, inpaint_dto::InpaintDto},
    errors::ImagesApiError,
    util::image_utils,
};

pub async fn colorize(form: &MultipartForm, state: &AppState) -> Result<Vec<u8>, ApiError> {
    let image = load_uploaded_image(form)?;
    let image = image_utils::resize_to_divisible_by_8(image).map_err(|e| e.value())?;
    let grayscale_image = image_utils::convert_to_grayscale(&image);

    let dto = ColorizeDto::from_form(form)?;

    let model = state.pipelines.get_colorizer().await?;
    let colorized = model.colorize(&grayscale_image, &dto.to_params()).await?;

    encode(&colorized)
}

pub async fn inpaint(form: &MultipartForm, state: &AppState) -> Result<Vec<u8>, ApiError> {
    let image = load_uploaded_image(form)?;
    let image = image_utils::resize_to_divisible_by_8(image).map_err(|e| e.value())?;

    let dto = InpaintDto::from_form(form)?;

    let mask = image_utils::create_mask_from_coordinates(image.dimensions(), &dto.mask_coordinates());

    let model = state.pipelines.get_inpainter().await?;
    let inpainted = model.inpaint(&image, &mask, &dto.to_params()).await?;

    encode(&inpainted)
}

pub fn grayscale(form: &MultipartForm) -> Result<Vec<u8>, ApiError> {
    let image = load_uploaded_image(form)?;
    let grayscale_image = image_utils::convert_to_grayscale(&image);

    encode(&grayscale_image)
}

fn load_uploaded_image(form: &MultipartForm) -> Result<RgbImage, ApiError> {
    let Some(file) = form.file("image") else {
        return Err(ImagesApiError::NoImageProvided.value());
    };

    tracing::debug!(
        "received {} ({}, {} bytes)",
        file.file_name,
        file.mime_type,
        file.data.len()
    );

    image_utils::validate_image(file).map_err(|e| e.value())
}

fn encode(image: &RgbImage) -> Result<Vec<u8>, ApiError> {
    image_utils::encode_png(image)
        .map_err(|e| ImagesApiError::EncodingFailed(e.to_string()).value())
}
