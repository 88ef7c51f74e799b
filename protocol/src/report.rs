//! # Receipt Reporting
//!
//! The protocol's sole outward call: once a transaction attempt reaches its
//! terminal state, the receipt is handed to a host-supplied sink. The
//! contract is deliberately thin — attempted exactly once, after the
//! terminal state, with no ordering or delivery guarantee beyond that. A
//! sink that forwards to an event bus, a database, or a metrics pipeline
//! does so on its own time; the executor neither waits nor retries.
//!
//! Three sinks ship with the crate: [`NullSink`] for hosts that do their
//! own bookkeeping, [`LogSink`] for structured `tracing` output, and
//! [`MemorySink`] for tests and in-process audit trails.

use parking_lot::Mutex;

use crate::transaction::Receipt;

/// Host-supplied destination for concluded receipts.
///
/// Implementations must not panic: a reporting failure is the sink's to
/// swallow or queue, never to propagate into the execution path that
/// already concluded.
pub trait ReportingSink: Send + Sync {
    /// Receives one concluded receipt. Called exactly once per attempt.
    fn report(&self, receipt: &Receipt);
}

/// Discards every receipt.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportingSink for NullSink {
    fn report(&self, _receipt: &Receipt) {}
}

/// Emits every receipt through `tracing` — info for successes, warn for
/// refusals. The host owns subscriber installation and filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportingSink for LogSink {
    fn report(&self, receipt: &Receipt) {
        match receipt.error() {
            None => tracing::info!(
                id = %receipt.id(),
                transaction = %receipt.transaction(),
                "receipt"
            ),
            Some(error) => tracing::warn!(
                id = %receipt.id(),
                transaction = %receipt.transaction(),
                error = %error,
                "receipt"
            ),
        }
    }
}

/// Collects receipts in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    receipts: Mutex<Vec<Receipt>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of receipts collected so far.
    pub fn len(&self) -> usize {
        self.receipts.lock().len()
    }

    /// Whether nothing has been reported yet.
    pub fn is_empty(&self) -> bool {
        self.receipts.lock().is_empty()
    }

    /// The most recently reported receipt, cloned.
    pub fn last(&self) -> Option<Receipt> {
        self.receipts.lock().last().cloned()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<Receipt> {
        std::mem::take(&mut *self.receipts.lock())
    }
}

impl ReportingSink for MemorySink {
    fn report(&self, receipt: &Receipt) {
        self.receipts.lock().push(receipt.clone());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
