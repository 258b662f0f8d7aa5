pub mod account_service;
pub mod credit_service;
pub mod http;
pub mod transaction_service;
pub mod util;

use crate::core::config::AppConfig;
use crate::core::report::RecordSources;
use account_service::AccountServiceClient;
use credit_service::CreditServiceClient;
use http::ServiceClient;
use std::sync::Arc;
use transaction_service::TransactionServiceClient;

/// HTTP clients for the sibling services named in `config`.
pub fn record_sources(config: &AppConfig) -> RecordSources {
    let client = |base_url: &str| ServiceClient::new(base_url, config.retries, config.retry_delay_ms);

    RecordSources {
        accounts: Arc::new(AccountServiceClient::new(client(
            &config.services.accounts.base_url,
        ))),
        credits: Arc::new(CreditServiceClient::new(client(
            &config.services.credits.base_url,
        ))),
        transactions: Arc::new(TransactionServiceClient::new(client(
            &config.services.transactions.base_url,
        ))),
    }
}
