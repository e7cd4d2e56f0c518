use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::data_paths::DataPaths;

#[derive(Args, Clone)]
pub struct VersionArgs {}

pub struct VersionCommand {
    #[allow(dead_code)]
    args: VersionArgs,
}

impl VersionCommand {
    pub fn new(args: VersionArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, _data_paths: DataPaths) -> Result<()> {
        println!(
            "{} {}",
            env!("CARGO_PKG_NAME").bright_white(),
            env!("CARGO_PKG_VERSION").bright_yellow(),
        );
        println!("   {} {}", "Server:".bright_black(), host);
        Ok(())
    }
}
