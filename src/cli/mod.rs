//! CLI module for hubcli
//!
//! Command-line interface for the TransactionHub bookkeeping service.
//! Uses clap for argument parsing and a structured command pattern: one
//! Args/Command struct pair per subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod args;
pub mod commands;

pub use args::parse_percentage;

use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LogMode, LoggingConfig};

use commands::accounts::{AccountsArgs, AccountsCommand};
use commands::balance::{BalanceArgs, BalanceCommand};
use commands::clients::{ClientsArgs, ClientsCommand};
use commands::dashboard::{DashboardArgs, DashboardCommand};
use commands::exchanges::{ExchangesArgs, ExchangesCommand};
use commands::export::{ExportArgs, ExportCommand};
use commands::funding::{FundingArgs, FundingCommand};
use commands::login::{LoginArgs, LoginCommand};
use commands::logout::{LogoutArgs, LogoutCommand};
use commands::payment::{PaymentArgs, PaymentCommand};
use commands::pending::{PendingArgs, PendingCommand};
use commands::report_config::{ReportConfigArgs, ReportConfigCommand};
use commands::settings::{SettingsArgs, SettingsCommand};
use commands::transactions::{TransactionsArgs, TransactionsCommand};
use commands::version::{VersionArgs, VersionCommand};

/// Default server when neither --host nor HUBCLI_HOST is set
pub const DEFAULT_HOST: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "hubcli")]
#[command(version)]
#[command(about = "Terminal client for the TransactionHub bookkeeping service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TransactionHub server URL (overrides HUBCLI_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Remove the stored session token
    Logout(LogoutArgs),

    /// Show the operator dashboard
    Dashboard(DashboardArgs),

    /// List and manage clients
    Clients(ClientsArgs),

    /// List and manage exchanges
    Exchanges(ExchangesArgs),

    /// List accounts (client-exchange pairings)
    Accounts(AccountsArgs),

    /// List and delete transactions
    Transactions(TransactionsArgs),

    /// List pending payments
    Pending(PendingArgs),

    /// Record a funding transaction against an account
    Funding(FundingArgs),

    /// Record a balance transaction against an account
    Balance(BalanceArgs),

    /// Record a payment transaction against an account
    Payment(PaymentArgs),

    /// Update an account's contractual share percentages
    Settings(SettingsArgs),

    /// Show or edit an account's report configuration split
    ReportConfig(ReportConfigArgs),

    /// Export transactions to a CSV file
    Export(ExportArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Resolve the server URL: --host flag, then HUBCLI_HOST, then default
    pub fn get_host(&self) -> String {
        if let Some(host) = &self.host {
            return host.clone();
        }
        if let Ok(host) = std::env::var("HUBCLI_HOST") {
            if !host.is_empty() {
                return host;
            }
        }
        DEFAULT_HOST.to_string()
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let host = self.get_host();
        let data_paths = DataPaths::new(&self.data_dir);

        // Ensure all directories exist
        data_paths.ensure_directories()?;

        // The TUI editor owns the terminal, so it logs to file only
        let log_mode = match &self.command {
            Commands::ReportConfig(args) if args.opens_editor() => LogMode::FileOnly,
            _ => LogMode::ConsoleAndFile,
        };
        init_logging(LoggingConfig::new(log_mode, data_paths.clone()))?;

        match self.command {
            Commands::Login(args) => LoginCommand::new(args).execute(&host, data_paths).await,
            Commands::Logout(args) => LogoutCommand::new(args).execute(&host, data_paths).await,
            Commands::Dashboard(args) => DashboardCommand::new(args).execute(&host, data_paths).await,
            Commands::Clients(args) => ClientsCommand::new(args).execute(&host, data_paths).await,
            Commands::Exchanges(args) => ExchangesCommand::new(args).execute(&host, data_paths).await,
            Commands::Accounts(args) => AccountsCommand::new(args).execute(&host, data_paths).await,
            Commands::Transactions(args) => {
                TransactionsCommand::new(args).execute(&host, data_paths).await
            }
            Commands::Pending(args) => PendingCommand::new(args).execute(&host, data_paths).await,
            Commands::Funding(args) => FundingCommand::new(args).execute(&host, data_paths).await,
            Commands::Balance(args) => BalanceCommand::new(args).execute(&host, data_paths).await,
            Commands::Payment(args) => PaymentCommand::new(args).execute(&host, data_paths).await,
            Commands::Settings(args) => SettingsCommand::new(args).execute(&host, data_paths).await,
            Commands::ReportConfig(args) => {
                ReportConfigCommand::new(args).execute(&host, data_paths).await
            }
            Commands::Export(args) => ExportCommand::new(args).execute(&host, data_paths).await,
            Commands::Version(args) => VersionCommand::new(args).execute(&host, data_paths).await,
        }
    }
}
