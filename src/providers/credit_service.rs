use super::http::ServiceClient;
use crate::core::model::CreditSnapshot;
use crate::core::source::CreditSource;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, instrument};

/// Client for the credits service.
pub struct CreditServiceClient {
    http: ServiceClient,
}

impl CreditServiceClient {
    pub fn new(http: ServiceClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CreditSource for CreditServiceClient {
    #[instrument(skip(self))]
    async fn fetch_by_customer(&self, customer_id: &str) -> Result<Vec<CreditSnapshot>> {
        info!("Getting credits for customer");
        self.http
            .get_list(&["credits", "customer", customer_id], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_daily_balances(&self, customer_id: &str) -> Result<Vec<CreditSnapshot>> {
        info!("Getting credits with daily balances for customer");
        self.http
            .get_list(&["credits", "customer", customer_id, "daily-balances"], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<CreditSnapshot>> {
        info!("Getting all credits");
        self.http.get_list(&["credits"], &[]).await
    }
}
