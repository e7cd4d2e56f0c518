use anyhow::Result;
use clap::{Args, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::api::types::AccountId;
use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    pub action: Option<TransactionsAction>,
}

#[derive(Subcommand, Clone)]
pub enum TransactionsAction {
    /// List transactions
    List {
        /// Case-insensitive substring filter over account/type/note
        #[arg(long)]
        filter: Option<String>,

        /// Only transactions for this account
        #[arg(long)]
        account: Option<AccountId>,
    },

    /// Delete one or more transactions
    Delete {
        /// Transaction ids to delete
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub struct TransactionsCommand {
    args: TransactionsArgs,
}

impl TransactionsCommand {
    pub fn new(args: TransactionsArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;
        let action = self.args.action.clone().unwrap_or(TransactionsAction::List {
            filter: None,
            account: None,
        });

        match action {
            TransactionsAction::List { filter, account } => {
                let transactions = client.transactions().await?;
                let filtered: Vec<_> = transactions
                    .into_iter()
                    .filter(|t| account.map_or(true, |a| t.account == a))
                    .filter(|t| {
                        display::matches_filter(
                            &[
                                t.account_name.as_deref().unwrap_or(""),
                                &t.kind.to_string(),
                                t.note.as_deref().unwrap_or(""),
                            ],
                            filter.as_deref(),
                        )
                    })
                    .collect();
                display::print_transactions(&filtered);
            }

            TransactionsAction::Delete { ids, yes } => {
                if !yes {
                    warn!(
                        "Deleting {} transaction(s) requires confirmation. Use --yes to confirm.",
                        ids.len()
                    );
                    return Ok(());
                }

                // Sequential per-item deletes; each failure is counted, not fatal
                let bar = ProgressBar::new(ids.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );

                let mut deleted = 0usize;
                let mut failed = 0usize;
                for id in &ids {
                    match client.delete_transaction(*id).await {
                        Ok(()) => {
                            deleted += 1;
                            info!("Deleted transaction {}", id);
                        }
                        Err(e) => {
                            failed += 1;
                            warn!("Failed to delete transaction {}: {}", id, e);
                        }
                    }
                    bar.inc(1);
                }
                bar.finish_and_clear();

                if failed == 0 {
                    println!("{} Deleted {} transaction(s)", "✓".bright_green(), deleted);
                } else {
                    println!(
                        "Deleted {}, failed {}",
                        deleted.bright_green(),
                        failed.bright_red(),
                    );
                }
            }
        }

        Ok(())
    }
}
