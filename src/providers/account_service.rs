use super::http::ServiceClient;
use crate::core::model::AccountSnapshot;
use crate::core::source::AccountSource;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, instrument};

/// Client for the accounts service.
pub struct AccountServiceClient {
    http: ServiceClient,
}

impl AccountServiceClient {
    pub fn new(http: ServiceClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AccountSource for AccountServiceClient {
    #[instrument(skip(self))]
    async fn fetch_by_customer(&self, customer_id: &str) -> Result<Vec<AccountSnapshot>> {
        info!("Getting accounts for customer");
        self.http
            .get_list(&["accounts", "customer", customer_id], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_daily_balances(&self, customer_id: &str) -> Result<Vec<AccountSnapshot>> {
        info!("Getting accounts with daily balances for customer");
        self.http
            .get_list(&["accounts", "customer", customer_id, "daily-balances"], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<AccountSnapshot>> {
        info!("Getting all accounts");
        self.http.get_list(&["accounts"], &[]).await
    }
}
