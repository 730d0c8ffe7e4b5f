use crate::{
    app::{
        models::api_error::ApiError, util::multipart::models::multipart_form::MultipartForm,
    },
    images::models::mask_coordinates::MaskCoordinates,
    pipelines::inpainter::{InpaintParams, DEFAULT_INPAINT_PROMPT},
};

use super::parse_field;

#[derive(Debug, Clone)]
pub struct InpaintDto {
    pub mask_top: f64,
    pub mask_bottom: f64,
    pub mask_left: f64,
    pub mask_right: f64,
    pub prompt: String,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}

impl InpaintDto {
    pub fn from_form(form: &MultipartForm) -> Result<Self, ApiError> {
        Ok(Self {
            mask_top: parse_field(form, "mask_top", 0.25)?,
            mask_bottom: parse_field(form, "mask_bottom", 0.75)?,
            mask_left: parse_field(form, "mask_left", 0.25)?,
            mask_right: parse_field(form, "mask_right", 0.75)?,
            prompt: form
                .field("prompt")
                .unwrap_or(DEFAULT_INPAINT_PROMPT)
                .to_string(),
            guidance_scale: parse_field(form, "guidance_scale", 7.5)?,
            num_inference_steps: parse_field(form, "num_inference_steps", 50)?,
        })
    }

    pub fn mask_coordinates(&self) -> MaskCoordinates {
        MaskCoordinates {
            top: self.mask_top,
            bottom: self.mask_bottom,
            left: self.mask_left,
            right: self.mask_right,
        }
    }

    pub fn to_params(&self) -> InpaintParams {
        InpaintParams {
            prompt: self.prompt.to_string(),
            guidance_scale: self.guidance_scale,
            num_inference_steps: self.num_inference_steps,
        }
    }
}
