//! Conversion metrics collection and reporting.
//!
//! The collector owns the plain counters and renders them itself. The
//! `metrics` recorder only carries families the collector does not render
//! (duration histograms and the per-kind failure counter), so `/metrics`
//! can append the recorder output without repeating a family.

use metrics::{counter, histogram};
use renderer::StageTimings;
use serde::Serialize;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use gifbox_common::{ConvertError, SourceFormat};

/// Metrics collector for the conversion service.
#[derive(Debug)]
pub struct MetricsCollector {
    /// Request counts
    pub uploads: AtomicU64,
    pub conversions: AtomicU64,
    pub conversion_errors: AtomicU64,
    pub rejected_uploads: AtomicU64,

    /// Byte counts
    pub input_bytes: AtomicU64,
    pub output_bytes: AtomicU64,

    /// Per-stage timing stats
    decode_times: RwLock<TimingStats>,
    fit_times: RwLock<TimingStats>,
    composite_times: RwLock<TimingStats>,
    encode_times: RwLock<TimingStats>,

    /// Start time for uptime calculation
    start_time: Instant,
}

#[derive(Debug, Default, Clone, Copy)]
struct TimingStats {
    count: u64,
    total_us: u64,
    min_us: u64,
    max_us: u64,
    last_us: u64,
}

impl TimingStats {
    fn record(&mut self, duration: Duration) {
        let duration_us = duration.as_micros() as u64;
        self.count += 1;
        self.total_us += duration_us;
        self.last_us = duration_us;
        if self.min_us == 0 || duration_us < self.min_us {
            self.min_us = duration_us;
        }
        if duration_us > self.max_us {
            self.max_us = duration_us;
        }
    }

    fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.total_us as f64 / self.count as f64) / 1000.0
        }
    }

    fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            count: self.count,
            avg_ms: self.avg_ms(),
            min_ms: self.min_us as f64 / 1000.0,
            max_ms: self.max_us as f64 / 1000.0,
            last_ms: self.last_us as f64 / 1000.0,
        }
    }
}

/// Timing summary for one pipeline stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageSnapshot {
    pub count: u64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub last_ms: f64,
}

/// Point-in-time view of the collector.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub uploads: u64,
    pub conversions: u64,
    pub conversion_errors: u64,
    pub rejected_uploads: u64,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub decode: StageSnapshot,
    pub fit: StageSnapshot,
    pub composite: StageSnapshot,
    pub encode: StageSnapshot,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            uploads: AtomicU64::new(0),
            conversions: AtomicU64::new(0),
            conversion_errors: AtomicU64::new(0),
            rejected_uploads: AtomicU64::new(0),
            input_bytes: AtomicU64::new(0),
            output_bytes: AtomicU64::new(0),
            decode_times: RwLock::new(TimingStats::default()),
            fit_times: RwLock::new(TimingStats::default()),
            composite_times: RwLock::new(TimingStats::default()),
            encode_times: RwLock::new(TimingStats::default()),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming upload request
    pub fn record_upload(&self) {
        self.uploads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful conversion
    pub async fn record_conversion(
        &self,
        format: SourceFormat,
        input_bytes: usize,
        output_bytes: usize,
        timings: &StageTimings,
    ) {
        self.conversions.fetch_add(1, Ordering::Relaxed);
        self.input_bytes.fetch_add(input_bytes as u64, Ordering::Relaxed);
        self.output_bytes.fetch_add(output_bytes as u64, Ordering::Relaxed);

        histogram!("gifbox_conversion_duration_ms", "format" => format.to_string())
            .record(timings.total().as_secs_f64() * 1000.0);

        let stages = [
            ("decode", &self.decode_times, timings.decode),
            ("fit", &self.fit_times, timings.fit),
            ("composite", &self.composite_times, timings.composite),
            ("encode", &self.encode_times, timings.encode),
        ];
        for (stage, stats, duration) in stages {
            stats.write().await.record(duration);
            histogram!("gifbox_stage_duration_ms", "stage" => stage)
                .record(duration.as_secs_f64() * 1000.0);
        }
    }

    /// Record a failed request
    pub fn record_failure(&self, error: &ConvertError) {
        if error.is_pipeline_error() {
            self.conversion_errors.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected_uploads.fetch_add(1, Ordering::Relaxed);
        }
        counter!("gifbox_failures_by_kind_total", "kind" => error.kind()).increment(1);
    }

    /// Get current metrics snapshot
    pub async fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            uploads: self.uploads.load(Ordering::Relaxed),
            conversions: self.conversions.load(Ordering::Relaxed),
            conversion_errors: self.conversion_errors.load(Ordering::Relaxed),
            rejected_uploads: self.rejected_uploads.load(Ordering::Relaxed),
            input_bytes: self.input_bytes.load(Ordering::Relaxed),
            output_bytes: self.output_bytes.load(Ordering::Relaxed),
            decode: self.decode_times.read().await.snapshot(),
            fit: self.fit_times.read().await.snapshot(),
            composite: self.composite_times.read().await.snapshot(),
            encode: self.encode_times.read().await.snapshot(),
        }
    }

    /// Render the collector in Prometheus text exposition format.
    pub async fn render_prometheus(&self) -> String {
        let snapshot = self.snapshot().await;
        let mut output = String::new();

        let counters = [
            ("gifbox_uploads_total", "Total upload requests", snapshot.uploads),
            ("gifbox_conversions_total", "Successful conversions", snapshot.conversions),
            ("gifbox_conversion_errors_total", "Conversions failed in the pipeline", snapshot.conversion_errors),
            ("gifbox_rejected_uploads_total", "Uploads rejected before conversion", snapshot.rejected_uploads),
            ("gifbox_input_bytes_total", "Bytes of converted uploads", snapshot.input_bytes),
            ("gifbox_output_bytes_total", "Bytes of produced GIFs", snapshot.output_bytes),
        ];
        for (name, help, value) in counters {
            let _ = write!(
                output,
                "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"
            );
        }

        let _ = write!(
            output,
            "# HELP gifbox_stage_avg_ms Average stage duration in milliseconds\n# TYPE gifbox_stage_avg_ms gauge\n"
        );
        for (stage, stats) in [
            ("decode", &snapshot.decode),
            ("fit", &snapshot.fit),
            ("composite", &snapshot.composite),
            ("encode", &snapshot.encode),
        ] {
            let _ = writeln!(output, "gifbox_stage_avg_ms{{stage=\"{}\"}} {:.3}", stage, stats.avg_ms);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_stats_record() {
        let mut stats = TimingStats::default();
        stats.record(Duration::from_micros(2000));
        stats.record(Duration::from_micros(4000));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min_us, 2000);
        assert_eq!(stats.max_us, 4000);
        assert_eq!(stats.avg_ms(), 3.0);
    }

    #[tokio::test]
    async fn test_record_conversion_and_failure() {
        let collector = MetricsCollector::new();
        collector.record_upload();
        collector
            .record_conversion(SourceFormat::Png, 100, 50, &StageTimings::default())
            .await;
        collector.record_failure(&ConvertError::Decode("bad".into()));
        collector.record_failure(&ConvertError::MissingFile);

        let snapshot = collector.snapshot().await;
        assert_eq!(snapshot.uploads, 1);
        assert_eq!(snapshot.conversions, 1);
        assert_eq!(snapshot.conversion_errors, 1);
        assert_eq!(snapshot.rejected_uploads, 1);
        assert_eq!(snapshot.decode.count, 1);
    }

    #[tokio::test]
    async fn test_render_prometheus() {
        let collector = MetricsCollector::new();
        collector.record_upload();
        let text = collector.render_prometheus().await;
        assert!(text.contains("gifbox_uploads_total 1\n"));
        assert!(text.contains("# TYPE gifbox_conversions_total counter"));
        assert!(text.contains("gifbox_stage_avg_ms{stage=\"encode\"}"));
    }
}
