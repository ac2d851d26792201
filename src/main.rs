//! Bens - RSA-encrypted environment variables kept next to your code.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bens::cli::output;
use bens::cli::{execute, hint, Cli};
use bens::core::constants::LOG_ENV;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.global.verbose {
            EnvFilter::new("bens=debug")
        } else {
            EnvFilter::new("bens=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.global) {
        output::error(&e.to_string());
        if let Some(suggestion) = hint(&e) {
            output::hint(suggestion);
        }
        std::process::exit(1);
    }
}
