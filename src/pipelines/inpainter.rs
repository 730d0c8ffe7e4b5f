use std::{path::Path, sync::Arc};

use image::RgbImage;
use tokio::sync::Semaphore;

use super::{
    backend::PipelineBackend,
    enums::{device::Device, pipeline_kind::PipelineKind},
    errors::PipelineError,
    models::{load_spec::LoadSpec, pipeline_handle::PipelineHandle, pipeline_input::PipelineInput},
};

pub const DEFAULT_INPAINT_PROMPT: &str = "fill in the missing parts realistically";

#[derive(Debug, Clone, PartialEq)]
pub struct InpaintParams {
    pub prompt: String,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}

impl Default for InpaintParams {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_INPAINT_PROMPT.to_string(),
            guidance_scale: 7.5,
            num_inference_steps: 50,
        }
    }
}

pub fn resolve_inpainter_model(base_model: &str, fine_tuned_dir: &str) -> String {
    if Path::new(fine_tuned_dir).exists() {
        tracing::info!("using fine-tuned inpainting model from {}", fine_tuned_dir);
        fine_tuned_dir.to_string()
    } else {
        tracing::info!(
            "fine-tuned inpainting model not found at {}, using {}",
            fine_tuned_dir,
            base_model
        );
        base_model.to_string()
    }
}

pub struct InpainterModel {
    pub model_path: String,
    handle: PipelineHandle,
    backend: Arc<dyn PipelineBackend>,
    permits: Semaphore,
}

impl InpainterModel {
    pub async fn load(
        backend: Arc<dyn PipelineBackend>,
        model_path: String,
        device: Device,
        max_concurrent_runs: usize,
    ) -> Result<Self, PipelineError> {
        tracing::info!(
            "loading inpainting model from {} on {} ({})",
            model_path,
            device.value(),
            device.torch_dtype()
        );

        let spec = LoadSpec {
            kind: PipelineKind::Inpaint,
            model: model_path.to_string(),
            device,
        };
        let handle = backend.load(&spec).await?;

        tracing::info!("inpainting model loaded as pipeline {}", handle.id);

        Ok(Self {
            model_path,
            handle,
            backend,
            permits: Semaphore::new(max_concurrent_runs.max(1)),
        })
    }

    pub async fn inpaint(
        &self,
        image: &RgbImage,
        mask: &RgbImage,
        params: &InpaintParams,
    ) -> Result<RgbImage, PipelineError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| PipelineError::Closed)?;

        let input = PipelineInput {
            prompt: &params.prompt,
            image,
            mask_image: Some(mask),
            strength: None,
            guidance_scale: params.guidance_scale,
            num_inference_steps: params.num_inference_steps,
        };

        tracing::debug!("inpainting with {} on pipeline {}", self.model_path, self.handle.id);
        self.backend.run(&self.handle, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fine_tuned_directory_is_preferred_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let fine_tuned = dir.path().to_str().unwrap();

        let model = resolve_inpainter_model("runwayml/stable-diffusion-inpainting", fine_tuned);

        assert_eq!(model, fine_tuned);
    }

    #[test]
    fn base_model_is_used_without_fine_tuned_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("inpainting_pipeline");

        let model = resolve_inpainter_model(
            "runwayml/stable-diffusion-inpainting",
            missing.to_str().unwrap(),
        );

        assert_eq!(model, "runwayml/stable-diffusion-inpainting");
    }
}
