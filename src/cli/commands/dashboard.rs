use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct DashboardArgs {
    /// Also list the outstanding pending payments
    #[arg(long)]
    pub pending: bool,
}

pub struct DashboardCommand {
    args: DashboardArgs,
}

impl DashboardCommand {
    pub fn new(args: DashboardArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;

        if self.args.pending {
            // Independent resources, fetched concurrently
            let (dashboard, pending) =
                tokio::try_join!(client.dashboard(), client.pending_payments())?;
            info!("Dashboard loaded with {} pending payments", pending.len());

            display::print_dashboard(&dashboard);
            println!();
            display::print_pending_payments(&pending);
        } else {
            let dashboard = client.dashboard().await?;
            display::print_dashboard(&dashboard);
        }

        Ok(())
    }
}
