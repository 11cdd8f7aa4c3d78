//! cfkit CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Network allocation error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cfkit_core::{ConfigError, RegistryError};

mod commands;
mod topology;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const NETWORK_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "cfkit=debug" } else { "cfkit=info" };
    let mut filter = EnvFilter::from_default_env();
    for directive in [default_level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args, cli.quiet),
        Commands::Inventory(args) => commands::inventory::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<RegistryError>() {
        return match err {
            RegistryError::NoNetworkConfigured
            | RegistryError::SubnetExhausted { .. }
            | RegistryError::Network(_) => ExitCodes::NETWORK_ERROR,
            RegistryError::UnknownResource(_) | RegistryError::NotFound(_) => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::VALIDATION_FAILURE,
        };
    }
    if e.downcast_ref::<ConfigError>().is_some() {
        return ExitCodes::INVALID_ARGS;
    }
    ExitCodes::GENERAL_ERROR
}
