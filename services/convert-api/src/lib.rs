//! Image Conversion Service Library
//!
//! HTTP hosting layer around the [`renderer::Pipeline`]: serves the upload
//! form, accepts multipart PNG/SVG uploads and returns 400x160 GIFs.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the service router around shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Upload form
        .route("/", get(handlers::form::index_handler))
        // Conversion
        .route("/upload", post(handlers::upload::upload_handler))
        .route("/api/upload", post(handlers::upload::upload_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .route("/api/metrics", get(handlers::health::metrics_json_handler))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
