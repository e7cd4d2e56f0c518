//! TransactionHub API client implementation

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::ApiError;
use super::types::*;
use crate::session::Session;

/// TransactionHub API endpoints
pub struct HubEndpoints {
    /// Base URL of the server, without a trailing slash
    pub base_url: String,
}

impl HubEndpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn login(&self) -> String {
        format!("{}/api/login/", self.base_url)
    }

    pub fn dashboard(&self) -> String {
        format!("{}/api/mobile-dashboard/", self.base_url)
    }

    pub fn clients(&self) -> String {
        format!("{}/api/clients/", self.base_url)
    }

    pub fn client(&self, id: u64) -> String {
        format!("{}/api/clients/{}/", self.base_url, id)
    }

    pub fn exchanges(&self) -> String {
        format!("{}/api/exchanges/", self.base_url)
    }

    pub fn exchange(&self, id: u64) -> String {
        format!("{}/api/exchanges/{}/", self.base_url, id)
    }

    pub fn accounts(&self) -> String {
        format!("{}/api/accounts/", self.base_url)
    }

    pub fn account(&self, id: AccountId) -> String {
        format!("{}/api/accounts/{}/", self.base_url, id)
    }

    /// Per-account action endpoints: funding, balance, payment, settings,
    /// report-config
    pub fn account_action(&self, id: AccountId, action: &str) -> String {
        format!("{}/api/accounts/{}/{}/", self.base_url, id, action)
    }

    pub fn transactions(&self) -> String {
        format!("{}/api/transactions/", self.base_url)
    }

    pub fn transaction(&self, id: u64) -> String {
        format!("{}/api/transactions/{}/", self.base_url, id)
    }

    pub fn pending_payments(&self) -> String {
        format!("{}/api/pending-payments/", self.base_url)
    }
}

/// TransactionHub API client
///
/// One typed method per endpoint; no retries, the first failure surfaces
/// to the caller.
pub struct HubClient {
    http: reqwest::Client,
    endpoints: HubEndpoints,
    token: Option<String>,
}

impl HubClient {
    /// Create an unauthenticated client (only `login` is usable)
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        url::Url::parse(base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoints: HubEndpoints::new(base_url),
            token: None,
        })
    }

    /// Create a client that authenticates with a stored session token
    pub fn with_session(base_url: &str, session: &Session) -> Result<Self, ApiError> {
        if session.host != base_url {
            warn!(
                session_host = %session.host,
                host = %base_url,
                "Session was issued by a different host"
            );
        }

        let mut client = Self::new(base_url)?;
        client.token = Some(session.token.clone());
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.endpoints.base_url
    }

    /// Send a request, apply the auth header, classify the response
    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        debug!("{} {}", method, url);

        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Token {}", token));
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!("API error - Status: {}, Body: {}", status, text);
            return Err(ApiError::from_status(status, text));
        }

        // DELETE returns 204 with an empty body; parse that as JSON null
        let text = response.text().await?;
        let payload = if text.trim().is_empty() { "null" } else { &text };

        serde_json::from_str(payload).map_err(ApiError::Decode)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, url, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, url, Some(body)).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, url, Some(body)).await
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self.request::<(), _>(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Exchange username/password for a token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post(&self.endpoints.login(), &body).await?;
        info!("Logged in as {} (user id {})", response.username, response.user_id);
        Ok(response)
    }

    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        self.get(&self.endpoints.dashboard()).await
    }

    pub async fn clients(&self) -> Result<Vec<ClientRecord>, ApiError> {
        let clients: Vec<ClientRecord> = self.get(&self.endpoints.clients()).await?;
        info!("Fetched {} clients", clients.len());
        Ok(clients)
    }

    pub async fn create_client(&self, req: &ClientRequest) -> Result<ClientRecord, ApiError> {
        self.post(&self.endpoints.clients(), req).await
    }

    pub async fn update_client(&self, id: u64, req: &ClientRequest) -> Result<ClientRecord, ApiError> {
        self.put(&self.endpoints.client(id), req).await
    }

    pub async fn delete_client(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.client(id)).await
    }

    pub async fn exchanges(&self) -> Result<Vec<Exchange>, ApiError> {
        let exchanges: Vec<Exchange> = self.get(&self.endpoints.exchanges()).await?;
        info!("Fetched {} exchanges", exchanges.len());
        Ok(exchanges)
    }

    pub async fn create_exchange(&self, req: &ExchangeRequest) -> Result<Exchange, ApiError> {
        self.post(&self.endpoints.exchanges(), req).await
    }

    pub async fn update_exchange(&self, id: u64, req: &ExchangeRequest) -> Result<Exchange, ApiError> {
        self.put(&self.endpoints.exchange(id), req).await
    }

    pub async fn delete_exchange(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.exchange(id)).await
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        let accounts: Vec<Account> = self.get(&self.endpoints.accounts()).await?;
        info!("Fetched {} accounts", accounts.len());
        Ok(accounts)
    }

    pub async fn account(&self, id: AccountId) -> Result<Account, ApiError> {
        self.get(&self.endpoints.account(id)).await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let transactions: Vec<Transaction> = self.get(&self.endpoints.transactions()).await?;
        info!("Fetched {} transactions", transactions.len());
        Ok(transactions)
    }

    pub async fn delete_transaction(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&self.endpoints.transaction(id)).await
    }

    pub async fn pending_payments(&self) -> Result<Vec<PendingPayment>, ApiError> {
        let pending: Vec<PendingPayment> = self.get(&self.endpoints.pending_payments()).await?;
        info!("Fetched {} pending payments", pending.len());
        Ok(pending)
    }

    pub async fn record_funding(
        &self,
        id: AccountId,
        req: &AmountRequest,
    ) -> Result<Transaction, ApiError> {
        self.post(&self.endpoints.account_action(id, "funding"), req).await
    }

    pub async fn record_balance(
        &self,
        id: AccountId,
        req: &AmountRequest,
    ) -> Result<Transaction, ApiError> {
        self.post(&self.endpoints.account_action(id, "balance"), req).await
    }

    pub async fn record_payment(
        &self,
        id: AccountId,
        req: &AmountRequest,
    ) -> Result<Transaction, ApiError> {
        self.post(&self.endpoints.account_action(id, "payment"), req).await
    }

    pub async fn update_settings(
        &self,
        id: AccountId,
        req: &SettingsRequest,
    ) -> Result<Account, ApiError> {
        self.post(&self.endpoints.account_action(id, "settings"), req).await
    }

    pub async fn report_config(&self, id: AccountId) -> Result<ReportConfig, ApiError> {
        self.get(&self.endpoints.account_action(id, "report-config")).await
    }

    pub async fn update_report_config(
        &self,
        id: AccountId,
        req: &ReportConfigRequest,
    ) -> Result<ReportConfig, ApiError> {
        self.post(&self.endpoints.account_action(id, "report-config"), req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let endpoints = HubEndpoints::new("http://localhost:8000/");
        assert_eq!(endpoints.login(), "http://localhost:8000/api/login/");
        assert_eq!(
            endpoints.account_action(AccountId(7), "report-config"),
            "http://localhost:8000/api/accounts/7/report-config/"
        );
    }

    #[test]
    fn test_invalid_host_rejected() {
        assert!(matches!(
            HubClient::new("not a url"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_transaction_endpoint() {
        let endpoints = HubEndpoints::new("https://hub.example.com");
        assert_eq!(
            endpoints.transaction(12),
            "https://hub.example.com/api/transactions/12/"
        );
    }
}
