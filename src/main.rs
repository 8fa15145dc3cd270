//! Error-redirecting reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ forwarded headers ─▶ RedirectErrors ─▶ proxy_handler ─▶ Upstream
//!                                                 │
//!     Client Response                             │ status matched?
//!     ◀─────────────── upstream response ◀────────┤ no
//!     ◀─────────────── 302 Location: target ◀─────┘ yes
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use redirect_errors::config::load_config;
use redirect_errors::observability::{logging, metrics};
use redirect_errors::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "redirect-errors")]
#[command(about = "Reverse proxy that redirects upstream error responses", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    if cli.check {
        println!("{}: configuration OK", cli.config.display());
        return Ok(());
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("redirect-errors v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.on_ctrl_c();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
