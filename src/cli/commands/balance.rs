use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use crate::api::types::{AccountId, AmountRequest};
use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct BalanceArgs {
    /// Account id
    pub account: AccountId,

    /// Reported balance in account currency; may be negative after losses
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Decimal,

    /// Optional note stored with the transaction
    #[arg(long)]
    pub note: Option<String>,
}

pub struct BalanceCommand {
    args: BalanceArgs,
}

impl BalanceCommand {
    pub fn new(args: BalanceArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;

        info!(
            "Recording balance of {} against account {}",
            self.args.amount, self.args.account
        );
        let tx = client
            .record_balance(
                self.args.account,
                &AmountRequest {
                    amount: self.args.amount,
                    note: self.args.note.clone(),
                },
            )
            .await?;

        display::print_recorded(&tx);
        Ok(())
    }
}
