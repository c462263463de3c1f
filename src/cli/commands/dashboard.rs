//! Dashboard command for launching the egui interface

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::data_paths::DataPaths;
use crate::logging::{init_logging, LogMode, LoggingConfig};

#[derive(Args, Clone)]
pub struct DashboardArgs {
    /// Window width
    #[arg(long, default_value = "1200")]
    pub width: u32,

    /// Window height
    #[arg(long, default_value = "800")]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "Trading Assistant")]
    pub title: String,
}

pub struct DashboardCommand {
    args: DashboardArgs,
}

impl DashboardCommand {
    pub fn new(args: DashboardArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        // Console + file logging so startup problems are visible
        let log_config = LoggingConfig::new(LogMode::ConsoleAndFile, data_paths.clone());
        init_logging(log_config)?;

        info!("Starting dashboard");
        info!("Backend host: {}", host);
        info!("Data directory: {}", data_paths.root().display());

        crate::gui::launch_dashboard(
            self.args.width,
            self.args.height,
            &self.args.title,
            host,
            data_paths,
        )
        .await
    }
}
