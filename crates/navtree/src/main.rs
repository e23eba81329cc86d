//! navtree CLI - Navigation tree builder.
//!
//! Provides commands for:
//! - `render`: Build navigation JSON from a document collection
//! - `canonical`: Show how URLs are normalized into tree segments

mod collections;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CanonicalArgs, RenderArgs};
use output::Output;

/// navtree - Navigation trees from URL-tagged documents.
#[derive(Parser)]
#[command(name = "navtree", version, about)]
struct Cli {
    /// Enable verbose output (INFO logs on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a collection as navigation JSON.
    Render(RenderArgs),
    /// Print canonical forms and segments of URLs.
    Canonical(CanonicalArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Canonical(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
