//! Run orchestration: seed pages, wait for the queue to drain, collect

use crate::config::Config;
use crate::engine::{pool, Command, Engine, TaskQueue};
use crate::net::{build_http_client, Fetcher, RetryPolicy};
use crate::report::ResultRecord;
use crate::sources::{HttpCatalog, HttpDocuments, HttpResolver};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Completed records, in completion order
    pub records: Vec<ResultRecord>,

    /// Titles skipped after a terminal resolution failure
    pub skipped: Vec<String>,

    /// The latched catalog total, if any page fetch ever succeeded
    pub total_entries: Option<u64>,
}

/// Builds the engine from configuration and drives one run
pub struct Coordinator {
    engine: Arc<Engine>,
    workers: u32,
    seed_interval: Duration,
}

impl Coordinator {
    /// Creates a coordinator with the production retry discipline
    /// (retry every fetch forever)
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_retry_policy(config, RetryPolicy::Forever)
    }

    /// Creates a coordinator with an explicit retry policy
    ///
    /// Tests inject a bounded policy so a missing endpoint fails the
    /// affected commands instead of hanging the run.
    pub fn with_retry_policy(config: &Config, policy: RetryPolicy) -> Result<Self> {
        let fetcher = Fetcher::new(build_http_client()?, policy);

        let catalog = Arc::new(HttpCatalog::new(fetcher.clone(), &config.catalog)?);
        let resolver = Arc::new(HttpResolver::new(fetcher.clone(), &config.resolver)?);
        let documents = Arc::new(HttpDocuments::new(fetcher, &config.documents));

        let queue = Arc::new(TaskQueue::for_pool(
            config.pool.workers,
            config.pool.queue_floor,
        ));
        let engine = Arc::new(Engine::new(
            queue,
            catalog,
            resolver,
            documents,
            config.catalog.page_size,
        ));

        Ok(Self {
            engine,
            workers: config.pool.workers,
            seed_interval: Duration::from_millis(config.catalog.seed_interval_ms),
        })
    }

    /// The engine this coordinator drives
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Runs the whole tally to completion
    ///
    /// Seeds page-fetch commands, paced, until the catalog total is known
    /// and every page is covered; then blocks on queue completion and
    /// collects the results. A queue rejection while seeding aborts the
    /// run — it means the queue is undersized for this pacing.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!(
            "Starting tally: {} workers, queue capacity {}",
            self.workers,
            self.engine.queue().capacity()
        );

        let _workers = pool::spawn_workers(&self.engine, self.workers);
        let queue = self.engine.queue();

        // Pages are seeded speculatively while the total is unknown; the
        // pacing delay gives early pages time to latch the total before too
        // many speculative fetches pile up.
        let mut page: u32 = 1;
        loop {
            if self.engine.page_out_of_range(page) {
                break;
            }

            if let Some(total) = self.engine.total_entries() {
                tracing::debug!("Catalog total {}, seeding page {}", total, page);
            } else {
                tracing::debug!("Catalog total unknown, seeding page {}", page);
            }

            queue.submit(Command::FetchPage { page })?;
            tokio::time::sleep(self.seed_interval).await;
            page += 1;
        }

        tracing::info!("All {} pages seeded, waiting for completion", page - 1);
        queue.await_completion().await;

        let summary = RunSummary {
            records: self.engine.results(),
            skipped: self.engine.skipped(),
            total_entries: self.engine.total_entries(),
        };

        tracing::info!(
            "Tally complete: {} of {} entries counted, {} skipped",
            summary.records.len(),
            summary.total_entries.unwrap_or(0),
            summary.skipped.len()
        );

        Ok(summary)
    }

}

/// Runs a complete tally with the production retry discipline
///
/// This is the main library entry point: build a coordinator from the
/// configuration, run it, and hand back the summary for rendering.
pub async fn run_tally(config: &Config) -> Result<RunSummary> {
    Coordinator::new(config)?.run().await
}
