//! # Executor
//!
//! Turns a [`Transaction`] into a [`Receipt`] against a concrete point.
//!
//! Dispatch is validated, not probed: the executor reads the operation's
//! required capability and asks the point's [`Point`] declaration for it.
//! A point that does not declare the capability produces a failed receipt
//! with [`OperationError::CapabilityMismatch`] — no method on the point is
//! ever invoked, and the point's state is untouched.
//!
//! Every attempt concludes in exactly one receipt, which is handed to the
//! configured [`ReportingSink`] exactly once, after the terminal state is
//! fixed. The sink is fire-and-forget: it cannot alter or delay the
//! outcome, and the executor neither waits on nor retries it.

use std::fmt;
use std::sync::Arc;

use crate::balance::Point;
use crate::report::{LogSink, NullSink, ReportingSink};

use super::operation::Operation;
use super::receipt::{Observation, OperationError, Receipt};
use super::record::{Intent, Transaction};

/// Capability-checked transaction execution with receipt reporting.
///
/// Executors are cheap to clone and safe to share across threads; all the
/// interesting state lives in the points and the sink.
///
/// # Examples
///
/// ```
/// use specie_protocol::asset::Asset;
/// use specie_protocol::balance::Stockpile;
/// use specie_protocol::party::PartyId;
/// use specie_protocol::transaction::{Executor, Transaction};
///
/// let arrows = Asset::item("arrow").unwrap();
/// let chest = Stockpile::new();
/// let executor = Executor::silent();
///
/// let alice = PartyId::player("alice").unwrap();
/// let receipt = executor.execute(&chest, Transaction::give(arrows.count(10), [alice]));
/// assert!(receipt.is_success());
/// ```
#[derive(Clone)]
pub struct Executor {
    sink: Arc<dyn ReportingSink>,
}

impl Executor {
    /// Creates an executor reporting to `sink`.
    pub fn new(sink: Arc<dyn ReportingSink>) -> Self {
        Self { sink }
    }

    /// An executor that discards receipts.
    pub fn silent() -> Self {
        Self::new(Arc::new(NullSink))
    }

    /// An executor that reports receipts through `tracing`.
    pub fn logged() -> Self {
        Self::new(Arc::new(LogSink))
    }

    /// Executes `transaction` against `point` and returns the receipt.
    ///
    /// The receipt is reported to the sink before this returns, exactly
    /// once per attempt.
    pub fn execute(&self, point: &dyn Point, transaction: Transaction) -> Receipt {
        tracing::debug!(transaction = %transaction, "executing");
        let receipt = dispatch(point, transaction);
        if !receipt.is_success() {
            tracing::warn!(
                id = %receipt.id(),
                transaction = %receipt.transaction(),
                error = %display_error(&receipt),
                "transaction refused"
            );
        }
        self.sink.report(&receipt);
        receipt
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

fn dispatch(point: &dyn Point, transaction: Transaction) -> Receipt {
    let intent = transaction.intent().clone();
    match intent {
        Intent::Query(amount) => match point.as_queryable() {
            Some(queryable) => {
                let held = queryable.has(&amount);
                Receipt::observed(transaction, Observation::Held(held))
            }
            None => Receipt::failed(transaction, mismatch(Operation::Query)),
        },
        Intent::Give(amount) => match point.as_receiver() {
            Some(receiver) => match receiver.give(&amount) {
                Ok(()) => Receipt::succeeded(transaction),
                Err(error) => Receipt::failed(transaction, error.into()),
            },
            None => Receipt::failed(transaction, mismatch(Operation::Give)),
        },
        Intent::Set(amount) => match point.as_settable() {
            Some(settable) => match settable.set(&amount) {
                Ok(()) => Receipt::succeeded(transaction),
                Err(error) => Receipt::failed(transaction, error.into()),
            },
            None => Receipt::failed(transaction, mismatch(Operation::Set)),
        },
        Intent::Take(amount) => match point.as_source() {
            Some(source) => match source.take(&amount) {
                Ok(()) => Receipt::succeeded(transaction),
                Err(error) => Receipt::failed(transaction, error.into()),
            },
            None => Receipt::failed(transaction, mismatch(Operation::Take)),
        },
        Intent::Total(asset) => match point.as_total() {
            Some(total) => {
                let holding = total.total(&asset);
                Receipt::observed(transaction, Observation::Total(holding))
            }
            None => Receipt::failed(transaction, mismatch(Operation::Total)),
        },
    }
}

fn mismatch(operation: Operation) -> OperationError {
    OperationError::CapabilityMismatch {
        operation,
        capability: operation.required_capability(),
    }
}

fn display_error(receipt: &Receipt) -> String {
    receipt
        .error()
        .map(|error| error.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Amount, Asset};
    use crate::balance::{Queryable, Stockpile, Total};
    use crate::party::PartyId;
    use crate::report::MemorySink;

    fn arrows() -> Asset {
        Asset::item("arrow").unwrap()
    }

    fn alice() -> Vec<PartyId> {
        vec![PartyId::player("alice").unwrap()]
    }

    /// A point exposing only the read capabilities, backed by nothing.
    struct BareReadout;

    impl Queryable for BareReadout {
        fn has(&self, _amount: &Amount) -> bool {
            false
        }
    }

    impl Total for BareReadout {
        fn total(&self, _asset: &Asset) -> Option<Amount> {
            None
        }
    }

    impl Point for BareReadout {
        fn as_queryable(&self) -> Option<&dyn Queryable> {
            Some(self)
        }

        fn as_total(&self) -> Option<&dyn Total> {
            Some(self)
        }
    }

    #[test]
    fn give_then_total_through_the_executor() {
        let chest = Stockpile::new();
        let executor = Executor::silent();

        let receipt = executor.execute(&chest, Transaction::give(arrows().count(10), alice()));
        assert!(receipt.is_success());

        let receipt = executor.execute(&chest, Transaction::total(arrows(), alice()));
        assert_eq!(
            receipt.observation(),
            Some(&Observation::Total(Some(arrows().count(10))))
        );
    }

    #[test]
    fn query_answers_ride_the_observation() {
        let chest = Stockpile::new();
        let executor = Executor::silent();
        executor.execute(&chest, Transaction::give(arrows().count(3), alice()));

        let yes = executor.execute(&chest, Transaction::query(arrows().count(3), alice()));
        assert!(yes.is_success());
        assert_eq!(yes.observation(), Some(&Observation::Held(true)));

        let no = executor.execute(&chest, Transaction::query(arrows().count(4), alice()));
        assert!(no.is_success(), "a negative answer is still a success");
        assert_eq!(no.observation(), Some(&Observation::Held(false)));
    }

    #[test]
    fn missing_capability_fails_fast_without_touching_state() {
        let readout = BareReadout;
        let executor = Executor::silent();

        let receipt = executor.execute(&readout, Transaction::take(arrows().count(1), alice()));
        assert!(!receipt.is_success());
        assert!(matches!(
            receipt.error(),
            Some(OperationError::CapabilityMismatch {
                operation: Operation::Take,
                ..
            })
        ));
    }

    #[test]
    fn failures_carry_the_typed_error() {
        let chest = Stockpile::new();
        let executor = Executor::silent();

        let receipt = executor.execute(&chest, Transaction::take(arrows().count(5), alice()));
        assert!(matches!(
            receipt.error(),
            Some(OperationError::Supply(_))
        ));
    }

    #[test]
    fn every_attempt_reaches_the_sink_exactly_once() {
        let sink = Arc::new(MemorySink::new());
        let executor = Executor::new(sink.clone());
        let chest = Stockpile::new();

        executor.execute(&chest, Transaction::give(arrows().count(2), alice()));
        executor.execute(&chest, Transaction::take(arrows().count(9), alice()));

        let receipts = sink.drain();
        assert_eq!(receipts.len(), 2);
        assert!(receipts[0].is_success());
        assert!(!receipts[1].is_success());
    }
}
