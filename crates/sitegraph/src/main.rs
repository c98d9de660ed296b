//! sitegraph CLI - site graph engine.
//!
//! Provides commands for:
//! - `check`: Validate links and report tree diagnostics
//! - `tree`: Print the navigation tree as JSON
//! - `nav`: Print the navigation view as an indented list

mod commands;
mod error;
mod manifest;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, TreeArgs};
use output::Output;

/// sitegraph - navigation tree and link checker for content sites.
#[derive(Parser)]
#[command(name = "sitegraph", version, about)]
struct Cli {
    /// Enable verbose output (build timing and per-link logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate links and report branches without pages.
    Check(CheckArgs),
    /// Print the navigation tree as JSON.
    Tree(TreeArgs),
    /// Print the navigation view.
    Nav(NavArgs),
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
        Commands::Check(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
