//! formbridge - desktop form-filling bridge
//!
//! Main entry point for the formbridge CLI and server.

mod cli;
mod commands;
mod server;
mod wiring;

use clap::Parser;
use tracing::warn;

use formbridge_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::init_tracing()?;

    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    for warning in ConfigValidator::check(&config)? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command {
        None => server::run_server(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::run_server(config).await
        }
        Some(Commands::Windows) => commands::list_windows(&config).await,
        Some(Commands::Capture { id, output }) => {
            commands::capture(&config, &id, output.as_deref()).await
        }
        Some(Commands::Extract { image, context }) => {
            commands::extract(&config, &image, &context).await
        }
        Some(Commands::Replay { request }) => commands::replay(&config, &request).await,
        Some(Commands::Run { id, context, confirm }) => {
            commands::run(&config, &id, &context, confirm).await
        }
    }
}
