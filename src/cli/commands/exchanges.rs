use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tracing::warn;

use crate::api::types::ExchangeRequest;
use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct ExchangesArgs {
    #[command(subcommand)]
    pub action: Option<ExchangesAction>,
}

#[derive(Subcommand, Clone)]
pub enum ExchangesAction {
    /// List exchanges
    List {
        /// Case-insensitive substring filter over name/website
        #[arg(long)]
        filter: Option<String>,
    },

    /// Add a new exchange
    Add {
        name: String,
        #[arg(long)]
        website: Option<String>,
    },

    /// Update an existing exchange
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },

    /// Delete an exchange
    Delete {
        id: u64,
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub struct ExchangesCommand {
    args: ExchangesArgs,
}

impl ExchangesCommand {
    pub fn new(args: ExchangesArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;
        let action = self
            .args
            .action
            .clone()
            .unwrap_or(ExchangesAction::List { filter: None });

        match action {
            ExchangesAction::List { filter } => {
                let exchanges = client.exchanges().await?;
                let filtered: Vec<_> = exchanges
                    .into_iter()
                    .filter(|e| {
                        display::matches_filter(
                            &[e.name.as_str(), e.website.as_deref().unwrap_or("")],
                            filter.as_deref(),
                        )
                    })
                    .collect();
                display::print_exchanges(&filtered);
            }

            ExchangesAction::Add { name, website } => {
                if name.trim().is_empty() {
                    return Err(anyhow!("Exchange name cannot be empty"));
                }
                let created = client.create_exchange(&ExchangeRequest { name, website }).await?;
                println!(
                    "{} Exchange {} created (id {})",
                    "✓".bright_green(),
                    created.name.bright_white(),
                    created.id.bright_yellow(),
                );
            }

            ExchangesAction::Update { id, name, website } => {
                let exchanges = client.exchanges().await?;
                let current = exchanges
                    .iter()
                    .find(|e| e.id == id)
                    .ok_or_else(|| anyhow!("No exchange with id {}", id))?;

                let request = ExchangeRequest {
                    name: name.unwrap_or_else(|| current.name.clone()),
                    website: website.or_else(|| current.website.clone()),
                };
                let updated = client.update_exchange(id, &request).await?;
                println!("{} Exchange {} updated", "✓".bright_green(), updated.name);
            }

            ExchangesAction::Delete { id, yes } => {
                if !yes {
                    warn!("Deletion requires confirmation. Use --yes to confirm.");
                    return Ok(());
                }
                client.delete_exchange(id).await?;
                println!("{} Exchange {} deleted", "✓".bright_green(), id);
            }
        }

        Ok(())
    }
}
