use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RunPipelineResponse {
    pub images: Vec<String>,
}
