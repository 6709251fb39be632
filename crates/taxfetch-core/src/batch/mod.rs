//! Batch enrichment: load input rows, look each account up, write the results.

mod events;
mod runner;

pub use events::{BatchEvent, BatchState, CancelFlag, EventSink};
pub use runner::{BatchRunner, BatchSummary, ProcessedBatch};
