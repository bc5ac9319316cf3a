//! Folio CLI - documentation content compiler.
//!
//! Builds the component API model, page content and search index:
//! - `folio`: build and write every artifact
//! - `folio --check`: fail if any artifact on disk is out of date
//! - `folio --api`: build only `api.json`

mod build;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use build::BuildArgs;
use output::Output;

/// Folio - documentation content compiler.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.build.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = cli.build.execute(&output) {
        output.error(&format!("Error: {err}"));
        output.stale_paths(err.stale_paths());
        std::process::exit(1);
    }
}
