//! Bookshelf Server
//!
//! Serves the in-memory book catalogue over GraphQL.

use bookshelf::core::config::env_var;
use bookshelf::{CliOverrides, Config, Result};
use clap::{Arg, ArgAction, Command};
use std::path::Path;
use tokio::signal;
use tracing::{info, warn};

// Configure global allocator
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("bookshelf")
        .version(bookshelf::VERSION)
        .about("In-memory book catalogue served over GraphQL.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP server bind address")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
        )
        .arg(
            Arg::new("id-policy")
                .long("id-policy")
                .value_name("POLICY")
                .help("Id assignment for new books (sequential, length)")
        )
        .arg(
            Arg::new("print-schema")
                .long("print-schema")
                .action(ArgAction::SetTrue)
                .help("Print the GraphQL schema and exit")
        )
        .get_matches();

    if matches.get_flag("print-schema") {
        println!("{}", bookshelf::api::schema_sdl());
        return Ok(());
    }

    // Load configuration: file, then environment, then command line
    let cli = CliOverrides {
        http_addr: matches.get_one::<String>("http-addr").cloned(),
        log_level: matches.get_one::<String>("log-level").cloned(),
        id_policy: matches.get_one::<String>("id-policy").cloned(),
    };
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let config = Config::load_from(config_path, env_var, &cli)?;

    bookshelf::init_logging(&config.logging)?;

    let addr = config.server.http_addr;
    let app_state = bookshelf::core::create_app_state(config)?;

    bookshelf::api::start_server(addr, app_state, shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C signal, shutting down");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down");
        },
    }
}
