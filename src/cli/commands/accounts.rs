use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::types::AccountId;
use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub action: Option<AccountsAction>,
}

#[derive(Subcommand, Clone)]
pub enum AccountsAction {
    /// List accounts
    List {
        /// Case-insensitive substring filter over the account label
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show a single account
    Show { id: AccountId },
}

pub struct AccountsCommand {
    args: AccountsArgs,
}

impl AccountsCommand {
    pub fn new(args: AccountsArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;
        let action = self
            .args
            .action
            .clone()
            .unwrap_or(AccountsAction::List { filter: None });

        match action {
            AccountsAction::List { filter } => {
                let accounts = client.accounts().await?;
                let filtered: Vec<_> = accounts
                    .into_iter()
                    .filter(|a| display::matches_filter(&[a.label().as_str()], filter.as_deref()))
                    .collect();
                display::print_accounts(&filtered);
            }

            AccountsAction::Show { id } => {
                let account = client.account(id).await?;
                display::print_account_detail(&account);
            }
        }

        Ok(())
    }
}
