use anyhow::Result;
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tracing::info;

use crate::api::types::{AccountId, ReportConfigRequest};
use crate::data_paths::DataPaths;
use crate::display;
use crate::split::{round2, SplitInput, SplitState};
use crate::tui;

#[derive(Args, Clone)]
pub struct ReportConfigArgs {
    /// Account id
    pub account: AccountId,

    #[command(subcommand)]
    pub action: Option<ReportConfigAction>,
}

#[derive(Subcommand, Clone)]
pub enum ReportConfigAction {
    /// Show the current split
    Show,

    /// Update the split non-interactively
    Set {
        /// Total share percentage
        #[arg(long)]
        total: Option<f64>,

        /// Company sub-share percentage
        #[arg(long)]
        company: Option<f64>,

        /// My-own sub-share percentage
        #[arg(long)]
        my_own: Option<f64>,
    },

    /// Edit the split in an interactive form
    Edit,
}

impl ReportConfigArgs {
    /// The edit action takes over the terminal, so logging must go to file
    pub fn opens_editor(&self) -> bool {
        matches!(self.action, Some(ReportConfigAction::Edit))
    }
}

pub struct ReportConfigCommand {
    args: ReportConfigArgs,
}

impl ReportConfigCommand {
    pub fn new(args: ReportConfigArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;
        let account = self.args.account;
        let action = self.args.action.clone().unwrap_or(ReportConfigAction::Show);

        match action {
            ReportConfigAction::Show => {
                let config = client.report_config(account).await?;
                let state = SplitState::from_config(&config);
                print_split(&state);
            }

            ReportConfigAction::Set {
                total,
                company,
                my_own,
            } => {
                let config = client.report_config(account).await?;
                let mut state = SplitState::from_config(&config);

                if let Some(t) = total {
                    state = state.apply(SplitInput::TotalChanged(t));
                }
                match (company, my_own) {
                    // Both given explicitly: take them as-is and let the
                    // submit gate decide
                    (Some(c), Some(m)) => {
                        state.company = c;
                        state.my_own = m;
                    }
                    (Some(c), None) => state = state.apply(SplitInput::CompanyChanged(c)),
                    (None, Some(m)) => state = state.apply(SplitInput::MyOwnChanged(m)),
                    (None, None) => {}
                }

                // Authoritative validation; nothing is sent on failure
                state.check_submit()?;

                let updated = client
                    .update_report_config(
                        account,
                        &ReportConfigRequest {
                            friend_percentage: round2(state.company),
                            my_own_percentage: round2(state.my_own),
                        },
                    )
                    .await?;
                info!("Report config updated for account {}", account);

                println!("{} Report config saved", "✓".bright_green());
                print_split(&SplitState::from_config(&updated));
            }

            ReportConfigAction::Edit => {
                let config = client.report_config(account).await?;
                tui::report_editor::run(&client, account, config).await?;
            }
        }

        Ok(())
    }
}

fn print_split(state: &SplitState) {
    println!(
        "   {} {:.2}%",
        "Total share:".bright_black(),
        round2(state.total).bright_white(),
    );
    println!(
        "   {} {:.2}%",
        "Company:".bright_black(),
        round2(state.company).bright_yellow(),
    );
    println!(
        "   {} {:.2}%",
        "My own:".bright_black(),
        round2(state.my_own).bright_yellow(),
    );
    println!("   {}", display::validity_line(&state.validity()));
}
