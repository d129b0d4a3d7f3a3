//! # Rev Matrix
//!
//! Show Project CARS 2 gear and RPM telemetry on an 8x8 RGB LED matrix.
//!
//! Listens for the game's UDP telemetry and redraws the matrix on every
//! CarPhysics packet: the current gear as a glyph and engine RPM as a
//! colored rev bar.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load configuration (first argument, else `config/default.toml`, else defaults)
//!    - Set up logging with tracing subscriber
//!    - Open the LED matrix sink and bind the UDP socket
//!
//! 2. **Main Loop**
//!    - Decode each datagram, update car state, render and push to the matrix
//!    - Log status every 1000 datagrams
//!    - Handle Ctrl+C for graceful shutdown
//!
//! 3. **Graceful Shutdown**
//!    - Blank the matrix
//!    - Log totals
//!
//! # Examples
//!
//! ```bash
//! cargo run --release -- config/default.toml
//! ```
//!
//! Expected output:
//! ```text
//! INFO rev_matrix: Rev Matrix v0.1.0 starting...
//! INFO rev_matrix::matrix::serial: Opened LED matrix at /dev/ttyACM0 (115200 baud)
//! INFO rev_matrix: Listening for Project CARS 2 telemetry on 0.0.0.0:5606
//! ```

use anyhow::{Context, Result};
use std::path::Path;
use tokio::net::UdpSocket;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use rev_matrix::config::{Config, LoggingConfig, SinkKind};
use rev_matrix::display::{render, PixelGrid};
use rev_matrix::matrix::{MatrixSink, NullMatrix, SerialMatrix};
use rev_matrix::render_loop::RenderLoop;
use rev_matrix::telemetry::TelemetryState;

/// Configuration file used when no path is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Log file name prefix inside `logging.log_dir`
const LOG_FILE_PREFIX: &str = "rev-matrix.log";

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(std::env::args().nth(1))?;
    let _log_guard = init_logging(&config.logging);

    info!("Rev Matrix v{} starting...", env!("CARGO_PKG_VERSION"));

    let listen_addr = config.listen_addr()?;

    let mut sink: Box<dyn MatrixSink> = match config.matrix.sink {
        SinkKind::Serial => Box::new(SerialMatrix::open(
            &config.matrix.port,
            config.matrix.baud_rate,
            config.matrix.brightness,
        )?),
        SinkKind::Null => {
            info!("LED matrix output disabled (null sink)");
            Box::new(NullMatrix::new())
        }
    };

    let socket = UdpSocket::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind UDP socket on {}", listen_addr))?;
    info!("Listening for Project CARS 2 telemetry on {}", listen_addr);

    // Show neutral until the first packet arrives
    if let Err(e) = sink.push(&render(&TelemetryState::new())).await {
        warn!("Failed to draw initial frame: {}", e);
    }

    info!("Press Ctrl+C to exit");

    let mut render_loop = RenderLoop::new();
    let stats = render_loop.run(&socket, sink.as_mut(), shutdown_signal()).await;

    if let Err(e) = sink.push(&PixelGrid::new()).await {
        warn!("Failed to blank LED matrix: {}", e);
    }

    info!(
        "Total datagrams: {} ({} rendered, {} ignored, {} dropped, {} push failures)",
        stats.received, stats.rendered, stats.ignored, stats.dropped, stats.push_failures
    );

    Ok(())
}

/// Resolve the configuration to use
///
/// An explicit path must load; the default path is only used if it exists.
fn load_config(path: Option<String>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path).with_context(|| format!("Failed to load {}", path)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_PATH)),
        None => Ok(Config::default()),
    }
}

/// Initialize logging to stdout and, if configured, a daily rolling file
///
/// `RUST_LOG` overrides the configured level. The returned guard must be
/// held for the life of the program so buffered file logs get flushed.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let (file_layer, guard) = if logging.log_dir.is_empty() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::daily(&logging.log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => {
            warn!("Unable to listen for Ctrl+C ({}), running until killed", e);
            std::future::pending::<()>().await;
        }
    }
}
