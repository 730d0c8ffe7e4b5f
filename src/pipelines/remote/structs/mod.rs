pub mod backend_health_response;
pub mod load_pipeline_response;
pub mod run_pipeline_response;
