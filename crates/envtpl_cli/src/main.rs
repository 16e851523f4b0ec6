//! envtpl CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Configuration file not found
//! - 2: Environment not found (also invalid arguments)
//! - 3: Template not found
//! - 4: Output could not be written
//! - 5: Configuration file malformed
//! - 6: Template failed to render
//! - 10: Unexpected error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envtpl_core::{CoreError, ExitCodes};

mod commands;

use commands::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match commands::render::execute(cli.render, cli.quiet) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Logs go to stderr so stdout carries only the manifest in dry-run mode.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let default_filter = ["envtpl", "envtpl_core", "envtpl_templates"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Map an error to its exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<CoreError>()
        .map(CoreError::exit_code)
        .unwrap_or(ExitCodes::GENERAL_ERROR)
}
