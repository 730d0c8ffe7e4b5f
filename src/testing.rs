use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
};
use bytes::Bytes;
use image::{Rgb, RgbImage};

use crate::{
    app::{
        envy::Envy,
        util::multipart::models::{file_properties::FileProperties, multipart_form::MultipartForm},
    },
    images::util::image_utils::encode_png,
    pipelines::{
        backend::PipelineBackend,
        enums::device::Device,
        errors::PipelineError,
        models::{
            load_spec::LoadSpec, pipeline_handle::PipelineHandle, pipeline_input::PipelineInput,
        },
        service::Pipelines,
    },
    AppState,
};

pub const BOUNDARY: &str = "tint-api-test-boundary";
pub const FAKE_OUTPUT: Rgb<u8> = Rgb([200, 120, 40]);

pub fn test_envy() -> Envy {
    let vars = vec![
        (
            "FINE_TUNED_INPAINT_DIR".to_string(),
            "/nonexistent/tint-api/inpainting_pipeline".to_string(),
        ),
        ("RATE_LIMIT_PER_SEC".to_string(), "10000".to_string()),
    ];
    envy::from_iter(vars).unwrap()
}

#[derive(Debug, Clone)]
pub struct RecordedRun {
    pub model: String,
    pub prompt: String,
    pub image: RgbImage,
    pub mask_image: Option<RgbImage>,
    pub strength: Option<f32>,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
}

#[derive(Default)]
pub struct FakeBackend {
    pub cuda: bool,
    pub loads: AtomicUsize,
    pub fail_loads: AtomicUsize,
    pub fail_runs: AtomicBool,
    pub load_specs: Mutex<Vec<LoadSpec>>,
    pub runs: Mutex<Vec<RecordedRun>>,
}

#[async_trait]
impl PipelineBackend for FakeBackend {
    async fn cuda_available(&self) -> bool {
        self.cuda
    }

    async fn load(&self, spec: &LoadSpec) -> Result<PipelineHandle, PipelineError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let n = self.loads.fetch_add(1, Ordering::SeqCst);

        if self.fail_loads.load(Ordering::SeqCst) > 0 {
            self.fail_loads.fetch_sub(1, Ordering::SeqCst);
            return Err(PipelineError::Connection("connection refused".to_string()));
        }

        self.load_specs.lock().unwrap().push(spec.clone());

        Ok(PipelineHandle {
            id: format!("fake-{}", n),
            model: spec.model.to_string(),
        })
    }

    async fn run(
        &self,
        handle: &PipelineHandle,
        input: PipelineInput<'_>,
    ) -> Result<RgbImage, PipelineError> {
        self.runs.lock().unwrap().push(RecordedRun {
            model: handle.model.to_string(),
            prompt: input.prompt.to_string(),
            image: input.image.clone(),
            mask_image: input.mask_image.cloned(),
            strength: input.strength,
            guidance_scale: input.guidance_scale,
            num_inference_steps: input.num_inference_steps,
        });

        if self.fail_runs.load(Ordering::SeqCst) {
            return Err(PipelineError::Backend {
                status: 500,
                message: "CUDA out of memory".to_string(),
            });
        }

        Ok(RgbImage::from_pixel(
            input.image.width(),
            input.image.height(),
            FAKE_OUTPUT,
        ))
    }
}

pub fn test_state(backend: Arc<FakeBackend>) -> AppState {
    let envy = test_envy();
    let cuda_available = backend.cuda;
    let device = Device::resolve(envy.device.as_deref(), cuda_available).unwrap();
    let pipelines = Pipelines::new(backend, device, &envy);

    AppState {
        envy: Arc::new(envy),
        device,
        cuda_available,
        pipelines: Arc::new(pipelines),
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90])
    });
    encode_png(&image).unwrap()
}

pub fn file_properties(file_name: &str, data: Vec<u8>) -> FileProperties {
    FileProperties {
        field_name: "image".to_string(),
        file_name: file_name.to_string(),
        mime_type: mime::IMAGE_PNG,
        data: Bytes::from(data),
    }
}

pub fn form_with_fields(fields: &[(&str, &str)]) -> MultipartForm {
    MultipartForm {
        files: Vec::new(),
        fields: fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

pub fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
