use async_trait::async_trait;
use image::RgbImage;

use super::{
    errors::PipelineError,
    models::{load_spec::LoadSpec, pipeline_handle::PipelineHandle, pipeline_input::PipelineInput},
};

#[async_trait]
pub trait PipelineBackend: Send + Sync {
    async fn cuda_available(&self) -> bool;

    async fn load(&self, spec: &LoadSpec) -> Result<PipelineHandle, PipelineError>;

    async fn run(
        &self,
        handle: &PipelineHandle,
        input: PipelineInput<'_>,
    ) -> Result<RgbImage, PipelineError>;
}
