use anyhow::Result;
use clap::Args;

use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct PendingArgs {
    /// Case-insensitive substring filter over the account name
    #[arg(long)]
    pub filter: Option<String>,
}

pub struct PendingCommand {
    args: PendingArgs,
}

impl PendingCommand {
    pub fn new(args: PendingArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;

        let pending = client.pending_payments().await?;
        let filtered: Vec<_> = pending
            .into_iter()
            .filter(|p| {
                display::matches_filter(
                    &[p.account_name.as_deref().unwrap_or("")],
                    self.args.filter.as_deref(),
                )
            })
            .collect();
        display::print_pending_payments(&filtered);

        Ok(())
    }
}
