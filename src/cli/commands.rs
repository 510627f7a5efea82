//! CLI command implementations
//!
//! Both commands follow the same boot sequence:
//! 1. Configuration load (file, then command-line overrides)
//! 2. Logging setup
//! 3. Store open and schema verification
//!
//! A store that cannot be opened stops the boot; the server never binds.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::Level;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::ClimateStore;

use super::args::{Command, ConfigArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite observations database
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Pooled store connections (default 4)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Debug logging (default false)
    #[serde(default)]
    pub debug: bool,

    /// HTTP server settings
    #[serde(flatten)]
    pub server: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./Resources/hawaii.sqlite")
}

fn default_max_connections() -> u32 {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            debug: false,
            server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        Ok(config)
    }

    /// Resolve the effective configuration from a file and command-line flags
    pub fn resolve(args: &ConfigArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(database) = &args.database {
            config.database_path = database.clone();
        }
        if let Some(host) = &args.host {
            config.server.host = host.clone();
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.debug {
            config.debug = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.max_connections == 0 {
            return Err(CliError::config_error("max_connections must be > 0"));
        }

        Ok(())
    }
}

/// Install the global log subscriber. DEBUG when `debug` is set, INFO otherwise.
pub fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    // A subscriber installed earlier (tests, embedding) stays in place.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let options = match &cmd {
        Command::Serve { options } | Command::Inspect { options } => options,
    };
    let config = Config::resolve(options)?;
    init_tracing(config.debug);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Serve { .. } => rt.block_on(serve(config)),
        Command::Inspect { .. } => rt.block_on(inspect(config)),
    }
}

async fn open_store(config: &Config) -> CliResult<ClimateStore> {
    ClimateStore::open(&config.database_path, config.max_connections)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "store unavailable");
            CliError::from(e)
        })
}

/// Open the store and serve the HTTP API until the process is stopped
pub async fn serve(config: Config) -> CliResult<()> {
    let store = Arc::new(open_store(&config).await?);

    let server = HttpServer::new(config.server.clone(), Arc::clone(&store));
    let result = server
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)));

    store.close().await;
    result
}

/// Open the store, verify it and print a summary of its contents
pub async fn inspect(config: Config) -> CliResult<()> {
    let store = open_store(&config).await?;

    let summary = {
        let mut session = store.session().await?;
        let station_count = session.station_count().await?;
        let stations = session.stations().await?;
        let span = session.date_span().await?;
        let window = session.year_window().await?;

        json!({
            "database_path": store.path().display().to_string(),
            "station_count": station_count,
            "stations": stations,
            "measurement_count": span.measurement_count,
            "first_date": span.first_date,
            "last_date": span.last_date,
            "reference_window": window,
        })
    };

    store.close().await;
    write_response(summary)
}
