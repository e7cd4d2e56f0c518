use anyhow::{anyhow, Result};
use clap::Args;
use owo_colors::OwoColorize;
use std::io::Write;
use tracing::info;

use crate::api::HubClient;
use crate::data_paths::DataPaths;
use crate::session::{self, Session};

#[derive(Args, Clone)]
pub struct LoginArgs {
    /// Username (prompted for when omitted)
    #[arg(long)]
    pub username: Option<String>,
}

pub struct LoginCommand {
    args: LoginArgs,
}

impl LoginCommand {
    pub fn new(args: LoginArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let username = match &self.args.username {
            Some(name) => name.clone(),
            None => prompt_username()?,
        };
        if username.trim().is_empty() {
            return Err(anyhow!("Username cannot be empty"));
        }

        // The password never touches the CLI arguments or the shell history
        let password = rpassword::prompt_password("Password: ")?;
        if password.is_empty() {
            return Err(anyhow!("Password cannot be empty"));
        }

        info!("Logging in to {}", host);

        let client = HubClient::new(host)?;
        let response = client.login(username.trim(), &password).await?;

        let new_session = Session {
            token: response.token,
            user_id: response.user_id,
            username: response.username.clone(),
            host: host.to_string(),
        };
        session::save_session(&data_paths, &new_session)?;

        println!(
            "{} Logged in as {} on {}",
            "✓".bright_green(),
            response.username.bright_white(),
            host.bright_yellow(),
        );
        Ok(())
    }
}

fn prompt_username() -> Result<String> {
    print!("Username: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
