use std::sync::Arc;

use image::RgbImage;
use tokio::sync::Semaphore;

use super::{
    backend::PipelineBackend,
    enums::{device::Device, pipeline_kind::PipelineKind},
    errors::PipelineError,
    models::{load_spec::LoadSpec, pipeline_handle::PipelineHandle, pipeline_input::PipelineInput},
};

pub const DEFAULT_COLORIZE_PROMPT: &str = "colorize the grayscale image";

#[derive(Debug, Clone, PartialEq)]
pub struct ColorizeParams {
    pub prompt: String,
    pub strength: f32,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}

impl Default for ColorizeParams {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_COLORIZE_PROMPT.to_string(),
            strength: 0.75,
            guidance_scale: 7.5,
            num_inference_steps: 50,
        }
    }
}

pub struct ColorizerModel {
    pub model_path: String,
    handle: PipelineHandle,
    backend: Arc<dyn PipelineBackend>,
    permits: Semaphore,
}

impl ColorizerModel {
    pub async fn load(
        backend: Arc<dyn PipelineBackend>,
        model_path: String,
        device: Device,
        max_concurrent_runs: usize,
    ) -> Result<Self, PipelineError> {
        tracing::info!(
            "loading colorizer model from {} on {} ({})",
            model_path,
            device.value(),
            device.torch_dtype()
        );

        let spec = LoadSpec {
            kind: PipelineKind::ImageToImage,
            model: model_path.to_string(),
            device,
        };
        let handle = backend.load(&spec).await?;

        tracing::info!("colorizer model loaded as pipeline {}", handle.id);

        Ok(Self {
            model_path,
            handle,
            backend,
            permits: Semaphore::new(max_concurrent_runs.max(1)),
        })
    }

    pub async fn colorize(
        &self,
        grayscale_image: &RgbImage,
        params: &ColorizeParams,
    ) -> Result<RgbImage, PipelineError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| PipelineError::Closed)?;

        let input = PipelineInput {
            prompt: &params.prompt,
            image: grayscale_image,
            mask_image: None,
            strength: Some(params.strength),
            guidance_scale: params.guidance_scale,
            num_inference_steps: params.num_inference_steps,
        };

        tracing::debug!("colorizing with {} on pipeline {}", self.model_path, self.handle.id);
        self.backend.run(&self.handle, input).await
    }
}
