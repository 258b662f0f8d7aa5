//! Record source abstractions for the sibling account, credit and transaction services.

use crate::core::model::{AccountSnapshot, CreditSnapshot, TransactionRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn fetch_by_customer(&self, customer_id: &str) -> Result<Vec<AccountSnapshot>>;

    /// Accounts of a customer with `daily_average` populated.
    async fn fetch_daily_balances(&self, customer_id: &str) -> Result<Vec<AccountSnapshot>>;

    async fn fetch_all(&self) -> Result<Vec<AccountSnapshot>>;
}

#[async_trait]
pub trait CreditSource: Send + Sync {
    async fn fetch_by_customer(&self, customer_id: &str) -> Result<Vec<CreditSnapshot>>;

    /// Credits of a customer with `daily_average` populated.
    async fn fetch_daily_balances(&self, customer_id: &str) -> Result<Vec<CreditSnapshot>>;

    async fn fetch_all(&self) -> Result<Vec<CreditSnapshot>>;
}

#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_by_customer(&self, customer_id: &str) -> Result<Vec<TransactionRecord>>;

    /// Transactions booked between `start` and `end`, both inclusive.
    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TransactionRecord>>;
}
