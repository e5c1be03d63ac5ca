//! Slipway CLI - build orchestration for the pythonnet solution

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slipway::builder::OrchestrationError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        // pipeline failures carry a diagnostic with captured tool output
        match e.downcast_ref::<OrchestrationError>() {
            Some(err) => eprintln!("{}", err.to_diagnostic()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Restore(args) => commands::restore::execute(args),
        Commands::Install(args) => commands::install::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
