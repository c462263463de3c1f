//! CLI module for tradedesk
//!
//! Structured command pattern on top of clap: one args struct and one
//! command struct per subcommand, all executed against the backend host
//! and the local data directory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};

use commands::analyze::{AnalyzeArgs, AnalyzeCommand};
use commands::brief::{BriefArgs, BriefCommand};
use commands::dashboard::{DashboardArgs, DashboardCommand};
use commands::status::{StatusArgs, StatusCommand};
use commands::version::{VersionArgs, VersionCommand};

/// Default backend base URL (the local autotrade server)
pub const DEFAULT_HOST: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "tradedesk")]
#[command(version)]
#[command(about = "Desktop dashboard for the autotrade assistant backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL
    #[arg(long, global = true, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the dashboard GUI
    Dashboard(DashboardArgs),

    /// Show account profile and open positions
    Status(StatusArgs),

    /// Print the hourly AI market brief
    Brief(BriefArgs),

    /// Request an AI analysis with explicit control values
    Analyze(AnalyzeArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let host = self.host.clone();
        let data_paths = DataPaths::new(&self.data_dir);

        // Ensure all directories exist
        data_paths.ensure_directories()?;

        match self.command {
            Commands::Dashboard(args) => {
                DashboardCommand::new(args).execute(&host, data_paths).await
            }
            Commands::Status(args) => StatusCommand::new(args).execute(&host, data_paths).await,
            Commands::Brief(args) => BriefCommand::new(args).execute(&host, data_paths).await,
            Commands::Analyze(args) => AnalyzeCommand::new(args).execute(&host, data_paths).await,
            Commands::Version(args) => VersionCommand::new(args).execute(&host, data_paths).await,
        }
    }
}
