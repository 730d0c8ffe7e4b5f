use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::app::envy::Envy;

use super::{
    backend::PipelineBackend,
    colorizer::ColorizerModel,
    enums::device::Device,
    errors::PipelineError,
    inpainter::{resolve_inpainter_model, InpainterModel},
};

pub struct Pipelines {
    backend: Arc<dyn PipelineBackend>,
    device: Device,
    colorizer_model: String,
    inpainter_model: String,
    max_concurrent_runs: usize,
    colorizer: OnceCell<ColorizerModel>,
    inpainter: OnceCell<InpainterModel>,
}

impl Pipelines {
    pub fn new(backend: Arc<dyn PipelineBackend>, device: Device, envy: &Envy) -> Self {
        Self {
            backend,
            device,
            colorizer_model: envy.colorizer_model.to_string(),
            inpainter_model: resolve_inpainter_model(
                &envy.inpainter_model,
                &envy.fine_tuned_inpaint_dir,
            ),
            max_concurrent_runs: envy.max_concurrent_runs,
            colorizer: OnceCell::new(),
            inpainter: OnceCell::new(),
        }
    }

    pub async fn get_colorizer(&self) -> Result<&ColorizerModel, PipelineError> {
        self.colorizer
            .get_or_try_init(|| {
                ColorizerModel::load(
                    self.backend.clone(),
                    self.colorizer_model.to_string(),
                    self.device,
                    self.max_concurrent_runs,
                )
            })
            .await
    }

    pub async fn get_inpainter(&self) -> Result<&InpainterModel, PipelineError> {
        self.inpainter
            .get_or_try_init(|| {
                InpainterModel::load(
                    self.backend.clone(),
                    self.inpainter_model.to_string(),
                    self.device,
                    self.max_concurrent_runs,
                )
            })
            .await
    }

    pub fn colorizer_loaded(&self) -> bool {
        self.colorizer.initialized()
    }

    pub fn inpainter_loaded(&self) -> bool {
        self.inpainter.initialized()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{test_envy, FakeBackend};

    #[tokio::test]
    async fn models_load_once_under_concurrent_requests() {
        let backend = Arc::new(FakeBackend::default());
        let pipelines = Pipelines::new(backend.clone(), Device::Cpu, &test_envy());

        let (a, b, c) = tokio::join!(
            pipelines.get_colorizer(),
            pipelines.get_colorizer(),
            pipelines.get_colorizer()
        );

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(backend.loads.load(Ordering::SeqCst), 1);
        assert!(pipelines.colorizer_loaded());
        assert!(!pipelines.inpainter_loaded());
    }

    #[tokio::test]
    async fn failed_load_is_retried_by_next_request() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_loads.store(1, Ordering::SeqCst);
        let pipelines = Pipelines::new(backend.clone(), Device::Cpu, &test_envy());

        assert!(pipelines.get_inpainter().await.is_err());
        assert!(!pipelines.inpainter_loaded());

        let inpainter = pipelines.get_inpainter().await.unwrap();
        assert_eq!(inpainter.model_path, "runwayml/stable-diffusion-inpainting");
        assert_eq!(backend.loads.load(Ordering::SeqCst), 2);
        assert!(pipelines.inpainter_loaded());
    }

    #[tokio::test]
    async fn models_load_with_configured_device_and_kind() {
        let backend = Arc::new(FakeBackend::default());
        let pipelines = Pipelines::new(backend.clone(), Device::Cuda, &test_envy());

        pipelines.get_colorizer().await.unwrap();
        pipelines.get_inpainter().await.unwrap();

        let specs = backend.load_specs.lock().unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].kind.value(), "img2img");
        assert_eq!(specs[0].model, "runwayml/stable-diffusion-v1-5");
        assert_eq!(specs[0].device, Device::Cuda);
        assert_eq!(specs[1].kind.value(), "inpaint");
    }
}
