use anyhow::{anyhow, Result};
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use crate::api::types::{AccountId, AmountRequest};
use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct PaymentArgs {
    /// Account id
    pub account: AccountId,

    /// Amount in account currency (e.g. 250.00)
    #[arg(long)]
    pub amount: Decimal,

    /// Optional note stored with the transaction
    #[arg(long)]
    pub note: Option<String>,
}

pub struct PaymentCommand {
    args: PaymentArgs,
}

impl PaymentCommand {
    pub fn new(args: PaymentArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        if self.args.amount <= Decimal::ZERO {
            return Err(anyhow!("Payment amount must be positive"));
        }

        let client = super::authenticated_client(host, &data_paths)?;

        info!(
            "Recording payment of {} against account {}",
            self.args.amount, self.args.account
        );
        let tx = client
            .record_payment(
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
