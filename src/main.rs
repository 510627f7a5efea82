//! climate-api entry point
//!
//! Parses CLI arguments, dispatches to the CLI commands, prints errors to
//! stderr and exits non-zero on failure. Configuration, logging and the
//! store are all set up by the CLI module.

use climate_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
