//! Brief command: print the hourly AI market summary

use anyhow::Result;
use clap::Args;

use crate::api::ApiClient;
use crate::data_paths::DataPaths;
use crate::render;

#[derive(Args, Clone)]
pub struct BriefArgs {}

pub struct BriefCommand {
    _args: BriefArgs,
}

impl BriefCommand {
    pub fn new(args: BriefArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, host: &str, _data_paths: DataPaths) -> Result<()> {
        let client = ApiClient::new(host)?;
        let brief = client.hourly_summary().await?;
        println!(
            "{}",
            brief
                .summary
                .unwrap_or_else(|| render::BRIEF_UNAVAILABLE.to_string())
        );
        Ok(())
    }
}
