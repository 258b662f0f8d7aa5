//! Concurrent dispatch of record source calls.
//!
//! Every call goes through [`FanOut::fetch`], which bounds it with a timeout and
//! turns any failure into [`SourceData::Unavailable`]. Report builders poll the
//! resulting futures together with `futures::join!`, so a report resumes only
//! once every branch has produced a value, and dropping the report future drops
//! all branches still in flight.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceHealth {
    Ok,
    Empty,
    Unavailable,
}

impl Display for SourceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SourceHealth::Ok => "OK",
                SourceHealth::Empty => "EMPTY",
                SourceHealth::Unavailable => "UNAVAILABLE",
            }
        )
    }
}

/// Health of each source that fed a report, keyed by source name.
pub type SourceStatus = BTreeMap<String, SourceHealth>;

/// Outcome of one fan-out branch.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData<T> {
    Available(Vec<T>),
    Unavailable(String),
}

impl<T> SourceData<T> {
    pub fn health(&self) -> SourceHealth {
        match self {
            SourceData::Available(records) if records.is_empty() => SourceHealth::Empty,
            SourceData::Available(_) => SourceHealth::Ok,
            SourceData::Unavailable(_) => SourceHealth::Unavailable,
        }
    }

    /// Records of the branch; an unavailable source reads as empty.
    pub fn records(&self) -> &[T] {
        match self {
            SourceData::Available(records) => records,
            SourceData::Unavailable(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<T> {
        match self {
            SourceData::Available(records) => records,
            SourceData::Unavailable(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FanOut {
    timeout: Duration,
}

impl FanOut {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs one source call under the branch timeout.
    pub async fn fetch<T, F>(&self, source: &str, call: F) -> SourceData<T>
    where
        F: Future<Output = Result<Vec<T>>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(records)) => {
                debug!(source, count = records.len(), "Source branch completed");
                SourceData::Available(records)
            }
            Ok(Err(e)) => {
                warn!(source, error = %e, "Source unavailable, continuing without its data");
                SourceData::Unavailable(e.to_string())
            }
            Err(_) => {
                warn!(source, timeout = ?self.timeout, "Source timed out, continuing without its data");
                SourceData::Unavailable(format!("timed out after {:?}", self.timeout))
            }
        }
    }
}

/// Collects the health of named branches into a [`SourceStatus`].
pub fn source_status<const N: usize>(branches: [(&str, SourceHealth); N]) -> SourceStatus {
    branches
        .into_iter()
        .map(|(name, health)| (name.to_string(), health))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn delayed(ms: u64, values: Vec<u32>) -> Result<Vec<u32>> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(values)
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_waits_for_every_branch() {
        let fanout = FanOut::new(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        let (slow, fast, empty) = futures::join!(
            fanout.fetch("slow", delayed(300, vec![1, 2])),
            fanout.fetch("fast", delayed(10, vec![3])),
            fanout.fetch("empty", delayed(100, vec![])),
        );

        // Branches overlap, so the barrier releases after the slowest one.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(400));
        assert_eq!(slow, SourceData::Available(vec![1, 2]));
        assert_eq!(fast, SourceData::Available(vec![3]));
        assert_eq!(empty.health(), SourceHealth::Empty);
    }

    #[tokio::test]
    async fn test_failed_branch_is_unavailable() {
        let fanout = FanOut::new(Duration::from_secs(5));
        let data: SourceData<u32> = fanout
            .fetch("accounts", async { Err(anyhow!("connection refused")) })
            .await;

        assert_eq!(data.health(), SourceHealth::Unavailable);
        assert!(data.records().is_empty());
        assert_eq!(
            data,
            SourceData::Unavailable("connection refused".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_branch_times_out() {
        let fanout = FanOut::new(Duration::from_millis(50));
        let (stalled, ok) = futures::join!(
            fanout.fetch("credits", delayed(10_000, vec![1])),
            fanout.fetch("accounts", delayed(5, vec![2])),
        );

        assert_eq!(stalled.health(), SourceHealth::Unavailable);
        assert!(stalled.into_records().is_empty());
        assert_eq!(ok.into_records(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_request_cancels_branches() {
        let fanout = FanOut::new(Duration::from_secs(60));
        let completed = Arc::new(AtomicUsize::new(0));

        let branch = |ms: u64| {
            let completed = Arc::clone(&completed);
            async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(vec![ms])
            }
        };

        let request = async {
            futures::join!(
                fanout.fetch("a", branch(1_000)),
                fanout.fetch("b", branch(2_000)),
            )
        };
        let abandoned = tokio::time::timeout(Duration::from_millis(10), request).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_source_status() {
        let status = source_status([
            ("accounts", SourceHealth::Ok),
            ("credits", SourceHealth::Unavailable),
        ]);
        assert_eq!(status.len(), 2);
        assert_eq!(status["credits"], SourceHealth::Unavailable);
        assert_eq!(SourceHealth::Empty.to_string(), "EMPTY");
    }
}
