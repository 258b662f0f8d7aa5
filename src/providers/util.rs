use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Connection failures, timeouts and 5xx answers; anything else will not improve on repeat.
pub fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect()
        || err.is_timeout()
        || err.status().is_some_and(|status| status.is_server_error())
}

/// Runs `operation` up to `1 + retries` times, sleeping `delay_ms` between
/// attempts. Non-transient failures are returned on first sight.
pub async fn with_retry<F, Fut, T>(mut operation: F, retries: usize, delay_ms: u64) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt <= retries && is_transient(&err) => {
                debug!(attempt, retries, error = %err, "Request failed, retrying");
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(err) => return Err(err.into()),
        }
    }
}
