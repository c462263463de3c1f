//! Analyze command: run the AI analysis from the terminal

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use crate::api::{AnalyzeRequest, ApiClient};
use crate::data_paths::DataPaths;
use crate::render;

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Capital to analyze with
    #[arg(long, default_value = "10000")]
    pub capital: u32,

    /// Risk appetite
    #[arg(long, value_parser = ["low", "medium", "high"])]
    pub risk: Option<String>,

    /// Leverage multiplier
    #[arg(long)]
    pub lev: Option<u32>,

    /// Indicators to include (repeatable)
    #[arg(long = "ind")]
    pub inds: Vec<String>,

    /// LLM model to use
    #[arg(long, default_value = "gpt-4o")]
    pub model: String,
}

pub struct AnalyzeCommand {
    args: AnalyzeArgs,
}

impl AnalyzeCommand {
    pub fn new(args: AnalyzeArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, _data_paths: DataPaths) -> Result<()> {
        let client = ApiClient::new(host)?;

        let request = AnalyzeRequest {
            capital: Decimal::from(self.args.capital),
            risk: self.args.risk.clone(),
            lev: self.args.lev,
            inds: self.args.inds.clone(),
            llm: Some(self.args.model.clone()),
        };

        let brief = client.analyze(&request).await?;
        println!(
            "{}",
            brief
                .summary
                .unwrap_or_else(|| render::BRIEF_UNAVAILABLE.to_string())
        );
        Ok(())
    }
}
