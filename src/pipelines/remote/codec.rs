use image::RgbImage;

use crate::{images::util::image_utils::encode_png, pipelines::errors::PipelineError};

pub fn image_to_base64(image: &RgbImage) -> Result<String, PipelineError> {
    Ok(base64::encode(encode_png(image)?))
}

pub fn base64_to_image(base64_image: &str) -> Result<RgbImage, PipelineError> {
    let bytes = base64::decode(base64_image)
        .map_err(|e| PipelineError::InvalidResponse(format!("could not decode image: {}", e)))?;

    Ok(image::load_from_memory(&bytes)?.to_rgb8())
}
