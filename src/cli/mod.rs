pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "touchline")]
#[command(about = "Club news sync service", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the sync scheduler, bus subscriber and HTTP API
    Serve,
    /// Run a single sync cycle and exit
    Sync,
    /// List stored articles
    List,
}
