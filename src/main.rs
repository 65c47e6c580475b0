use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use telnetchat::{Config, RoomRegistry, TelnetServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = telnetchat::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        telnetchat::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let server = match TelnetServer::bind(&config.server).await {
        Ok(server) => server,
        Err(e) => {
            error!("Unable to start telnet server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = Arc::new(RoomRegistry::new());

    tokio::select! {
        result = server.serve(registry.clone(), config.chat.clone()) => {
            if let Err(e) = result {
                error!("Telnet server stopped: {}", e);
                return ExitCode::FAILURE;
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!(
                "Shutting down ({} rooms open)",
                registry.room_count().await
            );
        }
    }

    ExitCode::SUCCESS
}
