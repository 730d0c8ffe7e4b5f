use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    #[serde(default = "default_pipeline_url")]
    pub pipeline_url: String,
    #[serde(default = "default_pipeline_timeout_secs")]
    pub pipeline_timeout_secs: u64,
    pub device: Option<String>,

    #[serde(default = "default_colorizer_model")]
    pub colorizer_model: String,
    #[serde(default = "default_inpainter_model")]
    pub inpainter_model: String,
    #[serde(default = "default_fine_tuned_inpaint_dir")]
    pub fine_tuned_inpaint_dir: String,

    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
    #[serde(default = "default_max_concurrent_runs")]
    pub max_concurrent_runs: usize,
    #[serde(default = "default_rate_limit_per_sec")]
    pub rate_limit_per_sec: u64,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_pipeline_url() -> String {
    "http://127.0.0.1:7860".to_string()
}

fn default_pipeline_timeout_secs() -> u64 {
    600
}

fn default_colorizer_model() -> String {
    "runwayml/stable-diffusion-v1-5".to_string()
}

fn default_inpainter_model() -> String {
    "runwayml/stable-diffusion-inpainting".to_string()
}

fn default_fine_tuned_inpaint_dir() -> String {
    "./models/inpainting_pipeline".to_string()
}

fn default_max_file_size() -> usize {
    16 * 1024 * 1024
}

fn default_max_concurrent_runs() -> usize {
    1
}

fn default_rate_limit_per_sec() -> u64 {
    5
}
