//! Progress events and cancellation for batch runs.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

/// Lifecycle of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Loading,
    Processing,
    Finalizing,
    Completed,
    Failed,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Processing => "processing",
            Self::Finalizing => "finalizing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Notification sent from a running batch to whoever is watching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// The run entered a new state.
    State(BatchState),
    /// Human-readable log line.
    Log(String),
    /// `processed` of `total` loaded records have been handled.
    Progress { processed: usize, total: usize },
    /// Record at `index` (0-based) had no usable account number.
    Skipped { index: usize },
    /// Lookup for `account` failed; the record was kept with an error status.
    RecordFailed { account: String, message: String },
}

/// Non-blocking event channel. Events are dropped when nobody listens.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<BatchEvent>>,
}

impl EventSink {
    pub fn new(tx: UnboundedSender<BatchEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A sink that discards every event.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn send(&self, event: BatchEvent) {
        if let Some(tx) = &self.tx {
            // A closed receiver only means nobody is watching anymore.
            let _ = tx.send(event);
        }
    }

    pub fn state(&self, state: BatchState) {
        self.send(BatchEvent::State(state));
    }

    pub fn log(&self, message: impl Into<String>) {
        self.send(BatchEvent::Log(message.into()));
    }

    pub fn progress(&self, processed: usize, total: usize) {
        self.send(BatchEvent::Progress { processed, total });
    }
}

/// Cooperative cancellation, checked between records.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
