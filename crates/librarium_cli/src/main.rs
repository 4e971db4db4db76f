//! Librarium CLI
//!
//! Interactive console shell for an in-memory Librarium catalog.
//!
//! The shell owns one [`librarium_core::Catalog`] for the lifetime of the
//! process; all text-to-type coercion (genres, copy counts, search fields)
//! happens here before the core is called, and every core failure is
//! printed and survived. State is not persisted across runs.

mod commands;
mod formatter;
mod seed;
mod shell;

use clap::Parser;
use formatter::OutputFormat;
use librarium_core::Catalog;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Librarium interactive catalog shell.
#[derive(Parser)]
#[command(name = "librarium")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Preload demo books and members
    #[arg(short, long)]
    seed: bool,

    /// Initial output format for listings
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut catalog = Catalog::new();
    if cli.seed {
        seed::seed(&mut catalog)?;
        info!(
            books = catalog.book_count(),
            members = catalog.member_count(),
            "demo data loaded"
        );
    }

    shell::run(catalog, cli.format)?;
    Ok(())
}
