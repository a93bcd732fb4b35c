use crate::report::ResultRecord;
use std::sync::Mutex;

/// Append-only collection of completed result records
///
/// Workers append concurrently; completion order is the report order, so no
/// sorting is done here or downstream.
#[derive(Debug, Default)]
pub struct ResultSink {
    records: Mutex<Vec<ResultRecord>>,
}

impl ResultSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed record
    pub fn push(&self, record: ResultRecord) {
        self.records
            .lock()
            .expect("result sink lock poisoned")
            .push(record);
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.records.lock().expect("result sink lock poisoned").len()
    }

    /// Returns whether no record has been collected yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes a snapshot of all records in completion order
    pub fn snapshot(&self) -> Vec<ResultRecord> {
        self.records
            .lock()
            .expect("result sink lock poisoned")
            .clone()
    }
}

/// Append-only log of entries skipped after a terminal resolution failure
///
/// Surfaced as a summary once the run completes; a skipped entry never
/// interrupts the pool or the final report.
#[derive(Debug, Default)]
pub struct FailureLog {
    titles: Mutex<Vec<String>>,
}

impl FailureLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a title that could not be resolved
    pub fn record(&self, title: &str) {
        self.titles
            .lock()
            .expect("failure log lock poisoned")
            .push(title.to_string());
    }

    /// Takes a snapshot of all skipped titles
    pub fn snapshot(&self) -> Vec<String> {
        self.titles.lock().expect("failure log lock poisoned").clone()
    }

    /// Number of skipped entries
    pub fn len(&self) -> usize {
        self.titles.lock().expect("failure log lock poisoned").len()
    }

    /// Returns whether any entry was skipped
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
