//! The self-feeding task engine
//!
//! A fixed pool of workers drains one bounded [`TaskQueue`] of typed
//! [`Command`]s. Processing a command may enqueue follow-ups into the same
//! queue: page fetches fan out into per-entry commands, and title searches
//! delegate into counting. The queue's outstanding counter gives the
//! coordinator a reliable completion signal that covers commands not yet
//! created when it starts waiting.

mod command;
mod coordinator;
mod handlers;
mod pool;
mod queue;

pub use command::Command;
pub use coordinator::{run_tally, Coordinator, RunSummary};
pub use pool::spawn_workers;
pub use queue::TaskQueue;

use crate::report::ResultRecord;
use crate::sources::{CatalogSource, DocumentSource, TitleResolver};
use crate::state::{DedupRegistry, FailureLog, ResultSink, TotalLatch};
use std::sync::Arc;

/// Shared engine state every worker dispatches against
///
/// Holds the queue, the synchronized run state, and the three collaborator
/// seams. Handlers live in the `handlers` module as methods on this type.
pub struct Engine {
    queue: Arc<TaskQueue>,
    registry: DedupRegistry,
    sink: ResultSink,
    total: TotalLatch,
    failures: FailureLog,
    catalog: Arc<dyn CatalogSource>,
    resolver: Arc<dyn TitleResolver>,
    documents: Arc<dyn DocumentSource>,
    page_size: u32,
}

impl Engine {
    pub fn new(
        queue: Arc<TaskQueue>,
        catalog: Arc<dyn CatalogSource>,
        resolver: Arc<dyn TitleResolver>,
        documents: Arc<dyn DocumentSource>,
        page_size: u32,
    ) -> Self {
        Self {
            queue,
            registry: DedupRegistry::new(),
            sink: ResultSink::new(),
            total: TotalLatch::new(),
            failures: FailureLog::new(),
            catalog,
            resolver,
            documents,
            page_size,
        }
    }

    /// The command queue this engine feeds and drains
    pub fn queue(&self) -> &Arc<TaskQueue> {
        &self.queue
    }

    /// Latched catalog size, once the first page fetch succeeded
    pub fn total_entries(&self) -> Option<u64> {
        self.total.get()
    }

    /// True once the total is known and `page` lies entirely beyond it
    pub fn page_out_of_range(&self, page: u32) -> bool {
        self.total.page_out_of_range(page, self.page_size)
    }

    /// Records an entry skipped after a terminal resolution failure
    pub fn record_skip(&self, title: &str) {
        self.failures.record(title);
    }

    /// Snapshot of completed records in completion order
    pub fn results(&self) -> Vec<ResultRecord> {
        self.sink.snapshot()
    }

    /// Snapshot of skipped entry titles
    pub fn skipped(&self) -> Vec<String> {
        self.failures.snapshot()
    }
}
