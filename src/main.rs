// Main entry point for the resize-server application.
// Parses configuration, initializes logging, builds the Axum router and
// serves it until a shutdown signal arrives.

mod processing;
mod shutdown_signal;
mod web;

use clap::Parser;
use shutdown_signal::shutdown_signal;
use tracing::Level;
use web::{DEFAULT_MAX_BODY_BYTES, ServiceSettings, StatusPolicy};

/// Command line arguments for resize-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "RESIZE_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "RESIZE_SERVER_PORT", default_value_t = 5001)]
    port: u16,

    /// Maximum size in bytes of a whole upload request.
    #[arg(long, env = "RESIZE_SERVER_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// How rejected uploads are reported.
    /// "legacy" answers 200 with a plain-text message, "strict" uses 4xx status codes.
    #[arg(long, env = "RESIZE_SERVER_ERROR_STATUS", value_enum, default_value_t = StatusPolicy::Legacy)]
    error_status: StatusPolicy,
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Logs go to stdout with module path and source location
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting resize-server...");

    let settings = ServiceSettings {
        max_body_bytes: config.max_body_bytes,
        status_policy: config.error_status,
    };
    tracing::info!(
        "Request body limit: {} bytes, error status policy: {:?}",
        settings.max_body_bytes,
        settings.status_policy
    );
    if settings.status_policy == StatusPolicy::Legacy {
        tracing::info!("Rejected uploads will be answered with 200 and a plain-text message");
    }

    let app = web::create_router(settings);
    tracing::info!("Axum router configured.");

    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, l)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            eprintln!("FATAL: Could not bind server. Error: {}. Exiting.", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
        eprintln!("ERROR: Server shut down unexpectedly. Error: {}", e);
    }

    tracing::info!("resize-server has shut down.");
}
