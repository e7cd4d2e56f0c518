use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::api::types::ClientRequest;
use crate::data_paths::DataPaths;
use crate::display;

#[derive(Args, Clone)]
pub struct ClientsArgs {
    #[command(subcommand)]
    pub action: Option<ClientsAction>,
}

#[derive(Subcommand, Clone)]
pub enum ClientsAction {
    /// List clients
    List {
        /// Case-insensitive substring filter over name/phone/email
        #[arg(long)]
        filter: Option<String>,
    },

    /// Add a new client
    Add {
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Update an existing client
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a client
    Delete {
        id: u64,
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub struct ClientsCommand {
    args: ClientsArgs,
}

impl ClientsCommand {
    pub fn new(args: ClientsArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let client = super::authenticated_client(host, &data_paths)?;
        let action = self
            .args
            .action
            .clone()
            .unwrap_or(ClientsAction::List { filter: None });

        match action {
            ClientsAction::List { filter } => {
                let clients = client.clients().await?;
                let filtered: Vec<_> = clients
                    .into_iter()
                    .filter(|c| {
                        display::matches_filter(
                            &[
                                c.name.as_str(),
                                c.phone.as_deref().unwrap_or(""),
                                c.email.as_deref().unwrap_or(""),
                            ],
                            filter.as_deref(),
                        )
                    })
                    .collect();
                display::print_clients(&filtered);
            }

            ClientsAction::Add { name, phone, email } => {
                if name.trim().is_empty() {
                    return Err(anyhow!("Client name cannot be empty"));
                }
                let created = client
                    .create_client(&ClientRequest { name, phone, email })
                    .await?;
                println!(
                    "{} Client {} created (id {})",
                    "✓".bright_green(),
                    created.name.bright_white(),
                    created.id.bright_yellow(),
                );
            }

            ClientsAction::Update {
                id,
                name,
                phone,
                email,
            } => {
                // Merge over the current record so omitted flags keep their value
                let clients = client.clients().await?;
                let current = clients
                    .iter()
                    .find(|c| c.id == id)
                    .ok_or_else(|| anyhow!("No client with id {}", id))?;

                let request = ClientRequest {
                    name: name.unwrap_or_else(|| current.name.clone()),
                    phone: phone.or_else(|| current.phone.clone()),
                    email: email.or_else(|| current.email.clone()),
                };
                let updated = client.update_client(id, &request).await?;
                info!("Updated client {}", id);
                println!("{} Client {} updated", "✓".bright_green(), updated.name);
            }

            ClientsAction::Delete { id, yes } => {
                if !yes {
                    warn!("Deletion requires confirmation. Use --yes to confirm.");
                    return Ok(());
                }
                client.delete_client(id).await?;
                println!("{} Client {} deleted", "✓".bright_green(), id);
            }
        }

        Ok(())
    }
}
