use super::http::ServiceClient;
use crate::core::model::TransactionRecord;
use crate::core::source::TransactionSource;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, instrument};

/// Client for the transactions service.
pub struct TransactionServiceClient {
    http: ServiceClient,
}

impl TransactionServiceClient {
    pub fn new(http: ServiceClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TransactionSource for TransactionServiceClient {
    #[instrument(skip(self))]
    async fn fetch_by_customer(&self, customer_id: &str) -> Result<Vec<TransactionRecord>> {
        info!("Getting recent transactions for customer");
        self.http
            .get_list(&["transactions", "customer", customer_id], &[])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TransactionRecord>> {
        info!("Getting transactions by date range");
        self.http
            .get_list(
                &["transactions"],
                &[("startDate", start.to_string()), ("endDate", end.to_string())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ProductRef;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_JSON: &str = r#"[
        {
            "id": "tx-1",
            "transactionType": "DEPOSIT",
            "amount": 250.0,
            "description": "Salary",
            "transactionDate": "2025-01-15T10:00:00Z",
            "accountId": "acc-1",
            "customerId": "c-1"
        },
        {
            "id": "tx-2",
            "transactionType": "PAYMENT",
            "amount": 80.0,
            "transactionDate": "2025-01-20T16:45:00-05:00",
            "creditId": "cr-1",
            "customerId": "c-1"
        }
    ]"#;

    fn client(uri: &str) -> TransactionServiceClient {
        TransactionServiceClient::new(ServiceClient::new(uri, 0, 0))
    }

    #[tokio::test]
    async fn test_fetch_by_customer() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/customer/c-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .mount(&mock_server)
            .await;

        let transactions = client(&mock_server.uri())
            .fetch_by_customer("c-1")
            .await
            .unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(
            transactions[0].product,
            ProductRef::Account("acc-1".to_string())
        );
        assert_eq!(
            transactions[1].product,
            ProductRef::Credit("cr-1".to_string())
        );
        assert_eq!(
            transactions[1].transaction_date.map(|d| d.to_rfc3339()),
            Some("2025-01-20T21:45:00+00:00".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_by_date_range_passes_bounds() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .and(query_param("startDate", "2025-01-01"))
            .and(query_param("endDate", "2025-01-31"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transactions = client(&mock_server.uri())
            .fetch_by_date_range(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(transactions.len(), 2);
    }

    #[tokio::test]
    async fn test_transaction_without_product_fails_the_fetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/customer/c-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"id": "tx-9", "transactionType": "FEE"}]"#),
            )
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri()).fetch_by_customer("c-1").await;
        assert!(result.is_err());
    }
}
