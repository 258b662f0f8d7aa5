//! Records owned by the customer service and snapshots pulled from sibling services.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Status token marking an account or credit as open and usable.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Credit category whose balance is the drawn part of its limit.
pub const CREDIT_CARD: &str = "CREDIT_CARD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Personal,
    #[serde(alias = "EMPRESARIAL")]
    Business,
}

impl Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CustomerType::Personal => "PERSONAL",
                CustomerType::Business => "BUSINESS",
            }
        )
    }
}

impl FromStr for CustomerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PERSONAL" => Ok(CustomerType::Personal),
            "BUSINESS" | "EMPRESARIAL" => Ok(CustomerType::Business),
            _ => Err(anyhow::anyhow!("Invalid customer type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_type: CustomerType,
    pub created_at: Option<DateTime<Utc>>,
}

/// Mutable part of a customer, as supplied on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_type: CustomerType,
}

impl CustomerDraft {
    pub fn into_record(self, id: String, created_at: Option<DateTime<Utc>>) -> CustomerRecord {
        CustomerRecord {
            id,
            document_type: self.document_type,
            document_number: self.document_number,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            customer_type: self.customer_type,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub id: String,
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub customer_id: String,
    pub balance: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    /// Only populated by the daily-balances endpoint.
    pub daily_average: Option<f64>,
}

impl AccountSnapshot {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }

    pub fn balance(&self) -> f64 {
        self.balance.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSnapshot {
    pub id: String,
    pub credit_number: Option<String>,
    #[serde(default)]
    pub credit_type: String,
    #[serde(default)]
    pub customer_id: String,
    pub outstanding_balance: Option<f64>,
    pub credit_limit: Option<f64>,
    pub available_credit: Option<f64>,
    pub interest_rate: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    /// Only populated by the daily-balances endpoint.
    pub daily_average: Option<f64>,
}

impl CreditSnapshot {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }

    pub fn is_credit_card(&self) -> bool {
        self.credit_type == CREDIT_CARD
    }
}

/// The single product a transaction was booked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductRef {
    Account(String),
    Credit(String),
}

impl ProductRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ProductRef::Account(_) => "ACCOUNT",
            ProductRef::Credit(_) => "CREDIT",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ProductRef::Account(id) | ProductRef::Credit(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub transaction_type: String,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub product: ProductRef,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire {
    id: String,
    #[serde(default)]
    transaction_type: String,
    amount: Option<f64>,
    description: Option<String>,
    transaction_date: Option<DateTime<Utc>>,
    account_id: Option<String>,
    credit_id: Option<String>,
}

impl TryFrom<TransactionWire> for TransactionRecord {
    type Error = String;

    fn try_from(wire: TransactionWire) -> Result<Self, Self::Error> {
        let product = match (wire.account_id, wire.credit_id) {
            (Some(account), None) => ProductRef::Account(account),
            (None, Some(credit)) => ProductRef::Credit(credit),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "transaction {} references both an account and a credit",
                    wire.id
                ));
            }
            (None, None) => {
                return Err(format!("transaction {} references no product", wire.id));
            }
        };

        Ok(TransactionRecord {
            id: wire.id,
            transaction_type: wire.transaction_type,
            amount: wire.amount,
            description: wire.description,
            transaction_date: wire.transaction_date,
            product,
        })
    }
}

impl<'de> Deserialize<'de> for TransactionRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = TransactionWire::deserialize(deserializer)?;
        TransactionRecord::try_from(wire).map_err(serde::de::Error::custom)
    }
}
