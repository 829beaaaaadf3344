use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use urlsift_sources::{FetchOutcome, Query, Source};

pub const DEFAULT_WORKERS: usize = 5;

/// Called each time a source settles: `(settled so far, total, outcome)`.
pub type SettleCallback = Arc<dyn Fn(usize, usize, &FetchOutcome) + Send + Sync>;

/// Runs every active source concurrently and hands back one outcome per
/// source, in the order the sources were given.
pub struct Dispatcher {
    client: Client,
    workers: usize,
    settle_callback: Option<SettleCallback>,
}

impl Dispatcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            workers: DEFAULT_WORKERS,
            settle_callback: None,
        }
    }

    /// Maximum number of fetches in flight at once. Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_settle_callback(mut self, callback: SettleCallback) -> Self {
        self.settle_callback = Some(callback);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn dispatch(&self, sources: &[Arc<dyn Source>], query: &Query) -> Vec<FetchOutcome> {
        let total = sources.len();
        info!(
            "Dispatching {} sources for {} with {} workers",
            total, query.domain, self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let query = Arc::new(query.clone());
        let settled = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(total);

        for (index, source) in sources.iter().enumerate() {
            let name = source.name();
            let source = source.clone();
            let client = self.client.clone();
            let query = query.clone();
            let semaphore = semaphore.clone();
            let settled = settled.clone();
            let settle_cb = self.settle_callback.clone();

            let handle = tokio::spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        debug!("Slot {} fetching {}", index, source.name());
                        source.fetch(&client, &query).await
                    }
                    Err(e) => {
                        FetchOutcome::failure(source.name(), format!("worker pool closed: {}", e))
                    }
                };

                report_settled(settle_cb.as_ref(), &settled, total, &outcome);
                outcome
            });

            handles.push((name, handle));
        }

        // Handles sit at their source's index, so awaiting them in order
        // restores input order whatever order the fetches finished in.
        let mut outcomes = Vec::with_capacity(total);
        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                // A panicked task never reached its own settle report
                Err(e) => {
                    warn!("Worker for {} failed: {}", name, e);
                    let outcome = FetchOutcome::failure(name, format!("worker task failed: {}", e));
                    report_settled(self.settle_callback.as_ref(), &settled, total, &outcome);
                    outcome
                }
            };
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            "Dispatch complete: {} succeeded, {} failed",
            succeeded,
            total - succeeded
        );
        outcomes
    }
}

fn report_settled(
    callback: Option<&SettleCallback>,
    settled: &AtomicUsize,
    total: usize,
    outcome: &FetchOutcome,
) {
    let count = settled.fetch_add(1, Ordering::Relaxed) + 1;
    if let Some(callback) = callback {
        callback(count, total, outcome);
    }
}
