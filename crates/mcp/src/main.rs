#![forbid(unsafe_code)]

mod entry;
mod monitor;
mod providers;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use monitor::TrainingMonitor;
use tracing_subscriber::EnvFilter;

const MCP_VERSION: &str = "2025-03-26";
const SERVER_NAME: &str = "pico-training-monitor";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-process request context. Built once in `main` and handed to every request.
pub(crate) struct McpServer {
    monitor: TrainingMonitor,
}

fn init_tracing() {
    // stdout carries the protocol; diagnostics go to stderr only.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tm_mcp=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    init_tracing();
    let config = MonitorConfig::from_env(&args);
    tracing::info!(
        log_dir = %config.log_dir.display(),
        sagemaker = config.sagemaker.is_configured(),
        vertex_ai = config.vertex.is_configured(),
        "{SERVER_NAME} {SERVER_VERSION} starting"
    );

    let monitor = TrainingMonitor::open(&config)?;
    if config.seed_demo_job {
        match monitor.seed_demo_job() {
            Ok(job) => tracing::info!(job_id = %job.job_id, "seeded demo job"),
            Err(err) => tracing::warn!(error = %err, "failed to seed demo job"),
        }
    }
    for (platform, enabled) in monitor.configured_platforms() {
        tracing::debug!(platform = %platform, enabled, "provider");
    }
    tracing::debug!(store = %monitor.store().storage_dir().display(), "local store ready");

    let mut server = McpServer::new(monitor);
    let result = entry::run_stdio(&mut server);
    if let Err(err) = &result {
        tracing::error!(error = %err, "transport failed");
    }
    result
}
