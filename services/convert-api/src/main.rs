//! Image Conversion Server
//!
//! Accepts PNG or SVG uploads and returns them letterboxed onto a 400x160
//! white canvas as GIF.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use convert_api::build_router;
use convert_api::config::{LimitArgs, ServiceConfig};
use convert_api::state::AppState;

const DEFAULT_PORT: u16 = 3000;

/// Image Conversion Server
#[derive(Parser, Debug)]
#[command(name = "convert-api")]
#[command(about = "Converts uploaded PNG/SVG images into 400x160 GIFs")]
struct Args {
    /// Listen address (defaults to 0.0.0.0 on $PORT, or 3000)
    #[arg(short, long, env = "GIFBOX_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "GIFBOX_WORKER_THREADS")]
    worker_threads: Option<usize>,

    #[command(flatten)]
    limits: LimitArgs,
}

impl Args {
    fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = match &self.listen {
            Some(listen) => listen.clone(),
            None => {
                let port = match std::env::var("PORT") {
                    Ok(port) => port
                        .trim()
                        .parse::<u16>()
                        .with_context(|| format!("Invalid PORT value: {}", port))?,
                    Err(_) => DEFAULT_PORT,
                };
                format!("0.0.0.0:{}", port)
            }
        };

        addr.parse()
            .with_context(|| format!("Invalid listen address: {}", addr))
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> anyhow::Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Prometheus metrics exporter initialized");
    info!("Starting image conversion server");

    let config = ServiceConfig::from(args.limits.clone());
    info!(
        max_upload_bytes = config.max_upload_bytes,
        max_source_pixels = config.limits.max_pixels,
        max_svg_bytes = config.limits.max_svg_bytes,
        "Loaded configuration"
    );

    let state = Arc::new(AppState::new(config).with_prometheus(prometheus_handle));
    let app = build_router(state);

    let addr = args.listen_addr()?;
    info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
