//! trl CLI - Entry point
//!
//! Usage: trl <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trilium_remote::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let connection = &cli.connection;

    match cli.command {
        Commands::Info => trilium_remote::cli::info::run(connection),
        Commands::Show(args) => trilium_remote::cli::show::run(args, connection),
        Commands::Search(args) => trilium_remote::cli::search::run(args, connection),
        Commands::Attrs(args) => trilium_remote::cli::attrs::run(args, connection),
        Commands::Label(args) => trilium_remote::cli::label::run(args, connection),
        Commands::Paths(args) => trilium_remote::cli::tree::run_paths(args, connection),
        Commands::Tree(args) => trilium_remote::cli::tree::run_tree(args, connection),
        Commands::Sql(args) => trilium_remote::cli::sql::run(args, connection),
    }
}
