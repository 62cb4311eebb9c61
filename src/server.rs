//! Tracing setup and the foreground server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use formbridge_api::{ApiServer, AppState, ServerConfig};
use formbridge_config::{Config, default_data_dir};
use formbridge_desktop::EnigoInputDriver;

use crate::wiring::build_pipeline;

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so command output on stdout stays
/// machine-readable. Log files are written to ~/.formbridge/logs/ as JSON
/// lines with daily rotation, and served back by `GET /api/v1/logs`.
pub(crate) fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("formbridge")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the writer thread alive for the whole process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().json().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

pub(crate) fn log_dir() -> PathBuf {
    default_data_dir().join("logs")
}

/// Run the HTTP API in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting formbridge v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = EnigoInputDriver::new().check_available().await {
        warn!("Input device unavailable, replay requests will fail: {}", e);
    }

    let pipeline = build_pipeline(&config);
    let state = Arc::new(AppState::new(pipeline).with_log_dir(log_dir()));
    let server = ApiServer::new(
        ServerConfig::new(&config.server.host, config.server.port),
        state,
    );

    info!("formbridge ready at http://{}/api/v1", server.addr());
    server.run(shutdown_signal()).await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
