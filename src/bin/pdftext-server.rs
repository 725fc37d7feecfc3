//! HTTP server binary for pdftext.
//!
//! Maps flags to `ServerConfig`, checks that pdfium can be loaded, and
//! serves `POST /extract-pdf` until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use pdftext::{serve, ExtractOptions, PdfiumExtractor, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Serve PDF text extraction over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "pdftext-server",
    version,
    about = "Serve PDF text extraction over HTTP (POST /extract-pdf)",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Interface to bind.
    #[arg(long, env = "PDFTEXT_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PDFTEXT_PORT", default_value_t = 5001)]
    port: u16,

    /// Directory for transient upload files (default: OS temp dir).
    #[arg(long, env = "PDFTEXT_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Largest accepted upload, in MiB.
    #[arg(long, env = "PDFTEXT_MAX_UPLOAD_MB", default_value_t = 50)]
    max_upload_mb: usize,

    /// Per-request extraction timeout in seconds.
    #[arg(long, env = "PDFTEXT_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// PDF user password applied to every upload.
    #[arg(long, env = "PDFTEXT_PASSWORD")]
    password: Option<String>,

    /// Directory containing the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFTEXT_VERBOSE")]
    verbose: bool,
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "pdftext=debug,tower_http=debug"
    } else {
        "pdftext=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .compact()
        .init();

    info!("Starting pdftext-server v{}", env!("CARGO_PKG_VERSION"));

    let config = build_config(&cli).context("Invalid configuration")?;

    let extractor = PdfiumExtractor::new(ExtractOptions {
        password: cli.password.clone(),
        library_dir: cli.pdfium_lib.clone(),
    });
    // A missing engine is reported per request too; warn early so it shows
    // up in the startup log rather than on the first upload.
    if let Err(e) = extractor.check_binding() {
        warn!(error = %e, "pdfium is not available; extraction requests will fail");
    }

    serve(config, Arc::new(extractor), shutdown_signal())
        .await
        .context("Server failed")?;

    info!("Server stopped");
    Ok(())
}

/// Map CLI args to `ServerConfig`.
fn build_config(cli: &Cli) -> Result<ServerConfig> {
    let mut builder = ServerConfig::builder()
        .host(cli.host.clone())
        .port(cli.port)
        .max_upload_bytes(cli.max_upload_mb.saturating_mul(1024 * 1024))
        .extraction_timeout(Duration::from_secs(cli.timeout));

    if let Some(ref dir) = cli.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }

    Ok(builder.build()?)
}
