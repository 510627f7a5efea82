//! CLI argument definitions using clap
//!
//! Commands:
//! - climate-api serve [--config <path>] [--database <path>] [--host <host>] [--port <port>] [--debug]
//! - climate-api inspect [--config <path>] [--database <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// climate-api - Read-only JSON API over a climate observations database
#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the store and serve the HTTP API
    Serve {
        #[command(flatten)]
        options: ConfigArgs,
    },

    /// Open the store, verify its schema and print a summary
    Inspect {
        #[command(flatten)]
        options: ConfigArgs,
    },
}

/// Configuration file and per-field overrides
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite observations database
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
