use std::time::Duration;

use async_trait::async_trait;
use image::RgbImage;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio_retry::{strategy::FixedInterval, Retry};

use crate::pipelines::{
    backend::PipelineBackend,
    errors::PipelineError,
    models::{load_spec::LoadSpec, pipeline_handle::PipelineHandle, pipeline_input::PipelineInput},
};

use super::{
    codec::{base64_to_image, image_to_base64},
    models::input_spec::{LoadPipelineInput, RunPipelineInput},
    structs::{
        backend_health_response::BackendHealthResponse,
        load_pipeline_response::LoadPipelineResponse, run_pipeline_response::RunPipelineResponse,
    },
};

const LOAD_RETRY_INTERVAL_MS: u64 = 10000;
const LOAD_ATTEMPTS: usize = 3;

pub struct RemoteBackend {
    client: Client,
    endpoint: String,
    load_retry_interval: Duration,
}

impl RemoteBackend {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Connection(e.to_string()))?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        tracing::info!("pipeline backend configured at {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            load_retry_interval: Duration::from_millis(LOAD_RETRY_INTERVAL_MS),
        })
    }

    #[cfg(test)]
    pub fn with_load_retry_interval(mut self, interval: Duration) -> Self {
        self.load_retry_interval = interval;
        self
    }

    async fn call_load(&self, spec: &LoadSpec) -> Result<PipelineHandle, PipelineError> {
        let memory_optimizations = spec.device.memory_optimizations();
        let input = LoadPipelineInput {
            kind: spec.kind.value(),
            model: spec.model.to_string(),
            device: spec.device.value(),
            torch_dtype: spec.device.torch_dtype(),
            safety_checker: false,
            attention_slicing: memory_optimizations,
            vae_slicing: memory_optimizations,
        };

        let url = format!("{}/pipelines", self.endpoint);
        tracing::debug!("pipeline load POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&input)
            .send()
            .await
            .map_err(|e| PipelineError::Connection(e.to_string()))?;
        let load_response: LoadPipelineResponse = read_json(response).await?;

        Ok(PipelineHandle {
            id: load_response.pipeline_id,
            model: spec.model.to_string(),
        })
    }
}

#[async_trait]
impl PipelineBackend for RemoteBackend {
    async fn cuda_available(&self) -> bool {
        let url = format!("{}/health", self.endpoint);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("pipeline backend health check failed: {}", e);
                return false;
            }
        };

        match read_json::<BackendHealthResponse>(response).await {
            Ok(health) => health.cuda_available,
            Err(e) => {
                tracing::warn!("pipeline backend health check failed: {}", e);
                false
            }
        }
    }

    async fn load(&self, spec: &LoadSpec) -> Result<PipelineHandle, PipelineError> {
        let retry_strategy =
            FixedInterval::new(self.load_retry_interval).take(LOAD_ATTEMPTS - 1);

        Retry::spawn(retry_strategy, || async {
            let result = self.call_load(spec).await;
            if let Err(e) = &result {
                tracing::warn!("pipeline load of {} failed: {}", spec.model, e);
            }
            result
        })
        .await
    }

    async fn run(
        &self,
        handle: &PipelineHandle,
        input: PipelineInput<'_>,
    ) -> Result<RgbImage, PipelineError> {
        let mask_image = match input.mask_image {
            Some(mask) => Some(image_to_base64(mask)?),
            None => None,
        };
        let body = RunPipelineInput {
            prompt: input.prompt.to_string(),
            image: image_to_base64(input.image)?,
            mask_image,
            strength: input.strength,
            guidance_scale: input.guidance_scale,
            num_inference_steps: input.num_inference_steps,
        };

        let url = format!("{}/pipelines/{}/run", self.endpoint, handle.id);
        tracing::debug!(
            "pipeline run POST {} for {} ({}x{}, {} steps)",
            url,
            handle.model,
            input.image.width(),
            input.image.height(),
            input.num_inference_steps
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Connection(e.to_string()))?;
        let run_response: RunPipelineResponse = read_json(response).await?;

        let Some(first) = run_response.images.first() else {
            return Err(PipelineError::NoImages);
        };

        base64_to_image(first)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PipelineError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(PipelineError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| PipelineError::InvalidResponse(e.to_string()))
}
