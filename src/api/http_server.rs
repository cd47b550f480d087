// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::caption::{caption_handler, caption_upload_handler, download_handler};
use crate::config::NodeConfig;
use crate::pipeline::{CaptionPipeline, ServiceInfo};
use crate::translation::{Language, LanguageInfo};
use crate::version;

/// Extra body allowance for JSON framing and multipart boundaries
const BODY_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CaptionPipeline>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Build tag, date and feature list
    pub build: serde_json::Value,
    pub services: Vec<ServiceInfo>,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
    pub default: LanguageInfo,
}

/// Build the HTTP router
pub fn create_router(state: AppState) -> Router {
    // Base64 inflates uploads by a third
    let body_limit = state.pipeline.settings().max_image_bytes / 3 * 4 + BODY_OVERHEAD;

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/languages", get(languages_handler))
        .route("/v1/caption", post(caption_handler))
        .route("/v1/caption/upload", post(caption_upload_handler))
        .route("/v1/caption/download", post(download_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the API until Ctrl+C
pub async fn start_server(config: &NodeConfig, pipeline: Arc<CaptionPipeline>) -> anyhow::Result<()> {
    let app = create_router(AppState { pipeline });

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let services = state.pipeline.services().list_services().await;
    let status = if services.iter().all(|s| s.available) {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: version::VERSION_NUMBER,
        build: version::get_version_info(),
        services,
    })
}

async fn languages_handler() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: Language::ALL.iter().map(Language::info).collect(),
        default: Language::default().info(),
    })
}
