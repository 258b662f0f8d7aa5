//! JSON-over-HTTP access to a sibling service.

use super::util::with_retry;
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

#[derive(Clone)]
pub struct ServiceClient {
    base_url: String,
    client: Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl ServiceClient {
    pub fn new(base_url: &str, retries: usize, retry_delay_ms: u64) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: Client::new(),
            retries,
            retry_delay_ms,
        }
    }

    /// Builds `<base_url>/<segments...>?<query>`, percent-encoding each segment.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid service URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Service URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetches a JSON array of records.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(segments, query)?;
        debug!(%url, "Requesting records");

        let response = with_retry(
            || async {
                self.client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()
            },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .with_context(|| format!("Request to {url} failed"))?;

        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        match serde_json::from_str::<Vec<T>>(&response_text) {
            Ok(records) => Ok(records),
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse records response"
                );
                Err(e).with_context(|| format!("Failed to parse response from {url}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = ServiceClient::new("http://localhost:8082/api/", 0, 0);

        let url = client.url(&["accounts", "customer", "c 1"], &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8082/api/accounts/customer/c%201"
        );

        let url = client
            .url(
                &["transactions"],
                &[("startDate", "2025-01-01".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8082/api/transactions?startDate=2025-01-01"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = ServiceClient::new("not a url", 0, 0);
        assert!(client.url(&["accounts"], &[]).is_err());
    }
}
