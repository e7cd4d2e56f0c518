use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::data_paths::DataPaths;
use crate::session;

#[derive(Args, Clone)]
pub struct LogoutArgs {}

pub struct LogoutCommand {
    #[allow(dead_code)]
    args: LogoutArgs,
}

impl LogoutCommand {
    pub fn new(args: LogoutArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, _host: &str, data_paths: DataPaths) -> Result<()> {
        if session::clear_session(&data_paths)? {
            println!("{} Session removed", "✓".bright_green());
        } else {
            println!("No stored session");
        }
        Ok(())
    }
}
