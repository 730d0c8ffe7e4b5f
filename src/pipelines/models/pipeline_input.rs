use image::RgbImage;

#[derive(Debug, Clone, Copy)]
pub struct PipelineInput<'a> {
    pub prompt: &'a str,
    pub image: &'a RgbImage,
    pub mask_image: Option<&'a RgbImage>,
    pub strength: Option<f32>,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}
