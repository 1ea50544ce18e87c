//! Binary crate for the `geocode` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Printing result lines and mapping failures to exit codes

use clap::Parser;
use geocode_core::GeocodeError;

mod cli;

#[tokio::main]
async fn main() {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);

    if let Err(err) = cmd.run().await {
        report(&err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<GeocodeError>() {
        // The notice has already gone to stdout.
        Some(GeocodeError::NoResults) => {}
        Some(geo) if geo.suggests_reconfigure() => {
            eprintln!("{geo}");
            eprintln!("Run 'geocode configure bing' to update the key.");
        }
        _ => eprintln!("Error: {err:#}"),
    }
}
