use crate::pipelines::enums::{device::Device, pipeline_kind::PipelineKind};

#[derive(Debug, Clone)]
pub struct LoadSpec {
    pub kind: PipelineKind,
    pub model: String,
    pub device: Device,
}
