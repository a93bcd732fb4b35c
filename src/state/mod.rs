//! Shared run state mutated by many workers
//!
//! Three small synchronized structures back the engine: the dedup registry
//! guarding at-most-once counting per entry, the single-assignment total
//! latch, and the append-only result sink / failure log pair.

mod dedup;
mod latch;
mod sink;

pub use dedup::DedupRegistry;
pub use latch::TotalLatch;
pub use sink::{FailureLog, ResultSink};
