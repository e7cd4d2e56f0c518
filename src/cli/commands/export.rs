use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::info;

use crate::api::types::{AccountId, Transaction};
use crate::data_paths::DataPaths;

#[derive(Args, Clone)]
pub struct ExportArgs {
    /// Only transactions for this account
    #[arg(long)]
    pub account: Option<AccountId>,

    /// Output file (default: <data>/exports/transactions-<timestamp>.csv)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub struct ExportCommand {
    args: ExportArgs,
}

impl ExportCommand {
    pub fn new(args: ExportArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;

        let transactions = client.transactions().await?;
        let filtered: Vec<_> = transactions
            .into_iter()
            .filter(|t| self.args.account.map_or(true, |a| t.account == a))
            .collect();

        let path = match &self.args.output {
            Some(path) => path.clone(),
            None => data_paths.exports().join(format!(
                "transactions-{}.csv",
                Utc::now().format("%Y%m%d_%H%M%S")
            )),
        };

        write_csv(&path, &filtered)?;
        info!("Exported {} transactions to {}", filtered.len(), path.display());

        println!(
            "{} Wrote {} transaction(s) to {}",
            "✓".bright_green(),
            filtered.len().bright_yellow(),
            path.display().bright_white(),
        );
        Ok(())
    }
}

fn write_csv(path: &PathBuf, transactions: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(["id", "account", "type", "amount", "date", "note"])?;
    for tx in transactions {
        writer.write_record([
            tx.id.to_string(),
            tx.account_name
                .clone()
                .unwrap_or_else(|| tx.account.to_string()),
            tx.kind.to_string(),
            tx.amount.to_string(),
            tx.created_at
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
            tx.note.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TransactionKind;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let transactions = vec![Transaction {
            id: 5,
            account: AccountId(3),
            account_name: Some("Acme @ Binance".to_string()),
            kind: TransactionKind::Funding,
            amount: dec!(1500.00),
            note: Some("wire".to_string()),
            created_at: None,
        }];

        write_csv(&path, &transactions).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,account,type,amount,date,note"));
        assert!(contents.contains("Acme @ Binance"));
        assert!(contents.contains("funding"));
        assert!(contents.contains("1500.00"));
    }
}
