use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoadPipelineInput {
    pub kind: String,
    pub model: String,
    pub device: String,
    pub torch_dtype: String,
    pub safety_checker: bool,
    pub attention_slicing: bool,
    pub vae_slicing: bool,
}

#[derive(Debug, Serialize)]
pub struct RunPipelineInput {
    pub prompt: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}
