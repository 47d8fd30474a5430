pub mod api;
pub mod config;
pub mod controller;
pub mod db;
pub mod models;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::controller::Controller;

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load config, bind the store and serve until Ctrl-C.
///
/// Config, store and bind failures are fatal; everything after startup is
/// reported per request.
pub async fn run() -> ExitCode {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let controller = match Controller::new(&config) {
        Ok(controller) => Arc::new(controller),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialise controller");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.service.port);
    let mut server = match api::start_api_server(controller, addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start API server");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for shutdown signal");
    }
    server.shutdown();
    server.stopped().await;

    ExitCode::SUCCESS
}
