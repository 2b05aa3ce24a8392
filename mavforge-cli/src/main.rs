/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # mavforge CLI Entry Point

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generate Unreal Engine message wrappers from MAVLink dialects.
#[derive(Parser, Debug)]
#[command(name = "mavforge", version, about)]
struct Cli {
    #[command(flatten)]
    args: mavforge_cli::GenerateArgs,

    /// Log every directory and file written.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let report = mavforge_cli::run(&cli.args)?;
    tracing::info!(
        files = report.files.len(),
        directories = report.directories.len(),
        "done"
    );
    Ok(())
}
