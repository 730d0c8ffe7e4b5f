use std::{env, net::SocketAddr, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{envy::Envy, errors::DefaultApiError, models::api_error::ApiError},
    pipelines::{
        backend::PipelineBackend, enums::device::Device, remote::service::RemoteBackend,
        service::Pipelines,
    },
};

mod app;
mod images;
mod pipelines;
#[cfg(test)]
mod testing;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub device: Device,
    pub cuda_available: bool,
    pub pipelines: Arc<Pipelines>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // pipeline backend
    let timeout = Duration::from_secs(envy.pipeline_timeout_secs);
    let backend: Arc<dyn PipelineBackend> = match RemoteBackend::new(&envy.pipeline_url, timeout) {
        Ok(backend) => Arc::new(backend),
        Err(e) => panic!("failed to create pipeline backend: {}", e),
    };

    let cuda_available = backend.cuda_available().await;
    let device = match Device::resolve(envy.device.as_deref(), cuda_available) {
        Ok(device) => device,
        Err(e) => panic!("{}", e),
    };
    tracing::info!(
        "cuda available: {}, running pipelines on {}",
        cuda_available,
        device.value()
    );

    let port = envy.port.unwrap_or(5000);
    let pipelines = Pipelines::new(backend, device, &envy);
    let state = AppState {
        envy: Arc::new(envy),
        device,
        cuda_available,
        pipelines: Arc::new(pipelines),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    let result = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = result {
        tracing::error!("server error: {}", e);
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    let max_file_size = state.envy.max_file_size;
    let rate_limit = state.envy.rate_limit_per_sec.max(1);

    Router::new()
        .route("/health", get(app::controller::get_health))
        .route("/api/colorize", post(images::controller::colorize))
        .route("/api/inpaint", post(images::controller::inpaint))
        .route("/api/grayscale", post(images::controller::grayscale))
        // layers
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(rate_limit, Duration::from_secs(1))),
        )
        .with_state(state)
}

async fn handle_layer_error(err: BoxError) -> ApiError {
    tracing::error!("middleware error: {}", err);
    DefaultApiError::InternalServerError.value()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }

    tracing::info!("shutting down");
}
