//! CLI definitions for formbridge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use formbridge_config::default_config_path;

/// formbridge CLI.
#[derive(Parser)]
#[command(name = "formbridge")]
#[command(about = "Capture a desktop form, extract field values, type them back in")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = default_config_path(), global = true, env = "FORMBRIDGE_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP API in foreground (default)
    Serve {
        /// Server host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List capturable windows
    Windows,

    /// Capture a window
    Capture {
        /// Window id from `windows`
        id: String,

        /// Write the PNG here instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the extraction program on a PNG file
    Extract {
        /// PNG image path
        image: PathBuf,

        /// Context JSON handed to the extraction program
        #[arg(long, default_value = "{}")]
        context: String,
    },

    /// Replay an automation request read from a JSON file
    Replay {
        /// Path to the request JSON
        request: PathBuf,
    },

    /// Capture, extract and replay in one go
    Run {
        /// Window id from `windows`
        id: String,

        /// Context JSON handed to the extraction program
        #[arg(long)]
        context: String,

        /// Ask for confirmation before each field
        #[arg(long)]
        confirm: bool,
    },
}
