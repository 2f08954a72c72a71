//! Application state shared by all handlers.

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use renderer::{Canvas, Pipeline};

use crate::config::ServiceConfig;
use crate::metrics::MetricsCollector;

/// Shared application state.
pub struct AppState {
    /// Conversion pipeline; immutable and shared by all requests.
    pub pipeline: Pipeline,

    /// Service configuration.
    pub config: ServiceConfig,

    /// In-process conversion statistics.
    pub metrics: MetricsCollector,

    /// Prometheus recorder handle, when one is installed.
    pub prometheus: Option<PrometheusHandle>,

    /// Process start time, reported by the health endpoint.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            pipeline: Pipeline::new(Canvas::STANDARD, config.limits),
            config,
            metrics: MetricsCollector::new(),
            prometheus: None,
            started_at: Utc::now(),
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
