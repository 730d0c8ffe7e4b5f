use axum::{extract::State, Json};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::AppState;

use super::enums::api_status::ApiStatus;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cuda_available: bool,
    pub device: String,
    pub colorizer_loaded: bool,
    pub inpainter_loaded: bool,
}

#[debug_handler]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ApiStatus::Healthy.value(),
        cuda_available: state.cuda_available,
        device: state.device.value(),
        colorizer_loaded: state.pipelines.colorizer_loaded(),
        inpainter_loaded: state.pipelines.inpainter_loaded(),
    })
}
