//! CLI parsing for scanboard

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "scanboard")]
#[command(about = "Client for a web vulnerability scan service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the scan service (overrides config and SCANBOARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a scanboard.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a target URL and print the findings
    Scan(commands::scan::Args),

    /// Talk to the security assistant
    Chat(commands::chat::Args),

    /// Download the PDF report of the latest scan
    Report(commands::report::Args),
}
