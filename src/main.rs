//! Duffel - encrypt-then-backup for a single folder.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use duffel::cli::output;
use duffel::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("DUFFEL_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("duffel=debug")
        } else {
            EnvFilter::new("duffel=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
