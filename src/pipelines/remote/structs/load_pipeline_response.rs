use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoadPipelineResponse {
    pub pipeline_id: String,
}
