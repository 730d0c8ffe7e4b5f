use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BackendHealthResponse {
    #[serde(default)]
    pub cuda_available: bool,
}
