//! Status command: one-shot profile and positions snapshot

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::api::ApiClient;
use crate::data_paths::DataPaths;
use crate::render;

#[derive(Args, Clone)]
pub struct StatusArgs {}

pub struct StatusCommand {
    _args: StatusArgs,
}

impl StatusCommand {
    pub fn new(args: StatusArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, host: &str, _data_paths: DataPaths) -> Result<()> {
        let client = ApiClient::new(host)?;

        let profile = client.profile().await?;
        println!("{}", "Account".bright_blue().bold());
        println!("  Capital:     ${}", render::fixed2(profile.capital));
        println!("  Open trades: {}", profile.open_trades);
        let pl = render::fixed2(profile.pl_today);
        if profile.pl_today < Decimal::ZERO {
            println!("  P/L today:   {}", pl.bright_red());
        } else {
            println!("  P/L today:   {}", pl.bright_green());
        }
        println!();

        let positions = client.positions().await?.positions;
        if positions.is_empty() {
            println!("No positions.");
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Symbol", "Qty", "Avg", "Value", "P/L", "P/L %"]);

        for position in &positions {
            let pl_cell = Self::signed_cell(position.pl());
            let pct_cell = Self::signed_cell(position.pl_percent());
            table.add_row(vec![
                Cell::new(&position.symbol),
                Cell::new(render::fixed2(position.qty)),
                Cell::new(render::fixed2(position.avg)),
                Cell::new(render::price_cell(position.value())),
                pl_cell,
                pct_cell,
            ]);
        }

        println!("{table}");
        Ok(())
    }

    fn signed_cell(value: Option<Decimal>) -> Cell {
        let (text, tone) = render::signed_cell(value);
        match tone {
            render::Tone::Positive => Cell::new(text).fg(Color::Green),
            render::Tone::Negative => Cell::new(text).fg(Color::Red),
            render::Tone::Neutral => Cell::new(text),
        }
    }
}
