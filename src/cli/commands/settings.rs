use anyhow::{anyhow, Result};
use clap::Args;
use owo_colors::OwoColorize;

use crate::api::types::{AccountId, SettingsRequest};
use crate::cli::parse_percentage;
use crate::data_paths::DataPaths;

#[derive(Args, Clone)]
pub struct SettingsArgs {
    /// Account id
    pub account: AccountId,

    /// Contractual loss share percentage (0-100)
    #[arg(long, value_parser = parse_percentage)]
    pub loss: Option<f64>,

    /// Contractual profit share percentage (0-100)
    #[arg(long, value_parser = parse_percentage)]
    pub profit: Option<f64>,
}

pub struct SettingsCommand {
    args: SettingsArgs,
}

impl SettingsCommand {
    pub fn new(args: SettingsArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        if self.args.loss.is_none() && self.args.profit.is_none() {
            return Err(anyhow!("Nothing to update: pass --loss and/or --profit"));
        }

        let client = super::authenticated_client(host, &data_paths)?;

        // Merge over current settings so one flag can be updated alone
        let current = client.account(self.args.account).await?;
        let request = SettingsRequest {
            loss_share_percentage: self.args.loss.unwrap_or(current.loss_share_percentage),
            profit_share_percentage: self.args.profit.unwrap_or(current.profit_share_percentage),
        };

        let updated = client.update_settings(self.args.account, &request).await?;
        println!(
            "{} {}: loss {:.2}%, profit {:.2}%",
            "✓".bright_green(),
            updated.label().bright_white(),
            updated.loss_share_percentage,
            updated.profit_share_percentage,
        );
        Ok(())
    }
}
