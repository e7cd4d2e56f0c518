//! CLI command implementations
//!
//! Each command follows a consistent pattern with dedicated Args and
//! Command structs and an `execute(host, data_paths)` entry point.

pub mod accounts;
pub mod balance;
pub mod clients;
pub mod dashboard;
pub mod exchanges;
pub mod export;
pub mod funding;
pub mod login;
pub mod logout;
pub mod payment;
pub mod pending;
pub mod report_config;
pub mod settings;
pub mod transactions;
pub mod version;

use crate::api::HubClient;
use crate::data_paths::DataPaths;
use crate::session;

/// Build an authenticated client from the stored session
pub(crate) fn authenticated_client(host: &str, data_paths: &DataPaths) -> anyhow::Result<HubClient> {
    let session = session::load_session(data_paths)?;
    Ok(HubClient::with_session(host, &session)?)
}
