//! CLI module for climate-api
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP API
//! - inspect: Verify the store and print a dataset summary

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{init_tracing, inspect, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
