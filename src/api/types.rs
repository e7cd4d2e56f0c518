//! Request/response models for the TransactionHub API
//!
//! Field names follow the backend contract verbatim; numeric ids arrive as
//! either JSON numbers or strings depending on the endpoint, so the id
//! newtype carries its own deserializer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for an account (a client-exchange pairing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(AccountId)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AccountIdVisitor;

        impl<'de> serde::de::Visitor<'de> for AccountIdVisitor {
            type Value = AccountId;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string or number representing an account ID")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AccountId(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<u64>()
                    .map(AccountId)
                    .map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_any(AccountIdVisitor)
    }
}

/// Body for `POST /api/login/`
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from `POST /api/login/`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: u64,
    pub username: String,
}

/// Operator dashboard summary from `GET /api/mobile-dashboard/`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Dashboard {
    #[serde(default)]
    pub client_count: u64,
    #[serde(default)]
    pub exchange_count: u64,
    #[serde(default)]
    pub account_count: u64,
    #[serde(default)]
    pub total_funding: Decimal,
    #[serde(default)]
    pub total_balance: Decimal,
    #[serde(default)]
    pub total_payment: Decimal,
    #[serde(default)]
    pub pending_payment_count: u64,
    #[serde(default)]
    pub pending_payment_total: Decimal,
}

/// A client of the operator
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update body for a client
#[derive(Debug, Clone, Serialize)]
pub struct ClientRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A trading venue clients hold accounts on
#[derive(Debug, Clone, Deserialize)]
pub struct Exchange {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// Create/update body for an exchange
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A client-exchange pairing with its contractual share percentages
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub client: u64,
    pub exchange: u64,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub exchange_name: Option<String>,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub loss_share_percentage: f64,
    #[serde(default)]
    pub profit_share_percentage: f64,
}

impl Account {
    /// Label shown in lists: "client @ exchange" with fallbacks to raw ids
    pub fn label(&self) -> String {
        let client = self
            .client_name
            .clone()
            .unwrap_or_else(|| format!("client#{}", self.client));
        let exchange = self
            .exchange_name
            .clone()
            .unwrap_or_else(|| format!("exchange#{}", self.exchange));
        format!("{} @ {}", client, exchange)
    }
}

/// Kinds of bookkeeping transactions the backend records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Funding,
    Balance,
    Payment,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Funding => write!(f, "funding"),
            TransactionKind::Balance => write!(f, "balance"),
            TransactionKind::Payment => write!(f, "payment"),
        }
    }
}

/// A recorded funding/balance/payment transaction
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub account: AccountId,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(rename = "transaction_type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/accounts/{id}/funding|balance|payment/`
#[derive(Debug, Clone, Serialize)]
pub struct AmountRequest {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A payment the backend expects but has not received
#[derive(Debug, Clone, Deserialize)]
pub struct PendingPayment {
    pub id: u64,
    pub account: AccountId,
    #[serde(default)]
    pub account_name: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Body for `POST /api/accounts/{id}/settings/`
#[derive(Debug, Clone, Serialize)]
pub struct SettingsRequest {
    pub loss_share_percentage: f64,
    pub profit_share_percentage: f64,
}

/// Per-account split of the total share percentage
///
/// Invariant owned by the backend: friend + my_own == my_total (within
/// 0.01) whenever my_total is positive. The client enforces the same check
/// before pushing an update.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ReportConfig {
    pub friend_percentage: f64,
    pub my_own_percentage: f64,
    pub my_total_percentage: f64,
}

/// Body for `POST /api/accounts/{id}/report-config/`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportConfigRequest {
    pub friend_percentage: f64,
    pub my_own_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_from_number_or_string() {
        let from_number: AccountId = serde_json::from_str("42").unwrap();
        let from_string: AccountId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, AccountId(42));
        assert_eq!(from_string, AccountId(42));
    }

    #[test]
    fn test_transaction_kind_wire_names() {
        let t: Transaction = serde_json::from_str(
            r#"{"id":1,"account":3,"transaction_type":"funding","amount":250.5}"#,
        )
        .unwrap();
        assert_eq!(t.kind, TransactionKind::Funding);
        assert_eq!(t.account, AccountId(3));
    }

    #[test]
    fn test_report_config_shape() {
        let cfg: ReportConfig = serde_json::from_str(
            r#"{"friend_percentage":40.0,"my_own_percentage":60.0,"my_total_percentage":100.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.friend_percentage, 40.0);
        assert_eq!(cfg.my_own_percentage, 60.0);
        assert_eq!(cfg.my_total_percentage, 100.0);
    }

    #[test]
    fn test_account_label_fallback() {
        let account: Account =
            serde_json::from_str(r#"{"id":9,"client":2,"exchange":5}"#).unwrap();
        assert_eq!(account.label(), "client#2 @ exchange#5");
    }
}
