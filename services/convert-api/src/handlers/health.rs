//! Health and metrics handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use gifbox_common::{OutputImage, SourceFormat};
use serde::Serialize;

use crate::metrics::MetricsSnapshot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub accepts: Vec<&'static str>,
    pub produces: &'static str,
    pub canvas: CanvasInfo,
    pub max_upload_bytes: usize,
}

#[derive(Serialize)]
pub struct CanvasInfo {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
}

/// GET /health - Basic health check
pub async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    let canvas = state.pipeline.canvas();

    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at,
        accepts: SourceFormat::ALL.iter().map(|f| f.mime_type()).collect(),
        produces: OutputImage::CONTENT_TYPE,
        canvas: CanvasInfo {
            width: canvas.width,
            height: canvas.height,
            background: canvas.background,
        },
        max_upload_bytes: state.config.max_upload_bytes,
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let mut body = state.metrics.render_prometheus().await;

    if let Some(handle) = &state.prometheus {
        body.push('\n');
        body.push_str(&handle.render());
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}

/// GET /api/metrics - Conversion statistics as JSON
pub async fn metrics_json_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot().await)
}
