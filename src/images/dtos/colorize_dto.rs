use crate::{
    app::{
        models::api_error::ApiError, util::multipart::models::multipart_form::MultipartForm,
    },
    pipelines::colorizer::{ColorizeParams, DEFAULT_COLORIZE_PROMPT},
};

use super::parse_field;

#[derive(Debug, Clone)]
pub struct ColorizeDto {
    pub prompt: String,
    pub strength: f32,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}

impl ColorizeDto {
    pub fn from_form(form: &MultipartForm) -> Result<Self, ApiError> {
        Ok(Self {
            prompt: form
                .field("prompt")
                .unwrap_or(DEFAULT_COLORIZE_PROMPT)
                .to_string(),
            strength: parse_field(form, "strength", 0.75)?,
            guidance_scale: parse_field(form, "guidance_scale", 7.5)?,
            num_inference_steps: parse_field(form, "num_inference_steps", 50)?,
        })
    }

    pub fn to_params(&self) -> ColorizeParams {
        ColorizeParams {
            prompt: self.prompt.to_string(),
            strength: self.strength,
            guidance_scale: self.guidance_scale,
            num_inference_steps: self.num_inference_steps,
        }
    }
}
