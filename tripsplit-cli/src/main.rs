#![warn(clippy::uninlined_format_args)]

mod args;
mod commands;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use commands::{Workspace, execute};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();
    let workspace = Workspace::from_cli(&cli)?;
    tracing::debug!(
        store = %workspace.store_path.display(),
        sheet = %workspace.sheet_path.display(),
        "Workspace resolved"
    );

    let output = execute(&workspace, cli.command)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
