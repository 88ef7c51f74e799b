//! # Transaction Module
//!
//! Intent records, capability-checked execution, and immutable receipts.
//! Every value movement or query a host wants audited passes through here.
//!
//! ## Architecture
//!
//! ```text
//! operation.rs — Operation tags, each bound to its required capability
//! record.rs    — Transaction: the immutable intent record
//! receipt.rs   — Receipt: the immutable outcome, with the error taxonomy
//! executor.rs  — Executor: validated dispatch + exactly-once reporting
//! transfer.rs  — Transfer: the composed two-point movement
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Construct** — application code builds a [`Transaction`] describing
//!    the intent (operation, asset/amount, participants).
//! 2. **Execute** — an [`Executor`] validates the operation's capability
//!    against the target point and invokes the single matching method.
//! 3. **Conclude** — the terminal state is captured exactly once as a
//!    [`Receipt`] with a fresh execution id, and never revised.
//! 4. **Report** — the receipt is handed to the host's
//!    [`ReportingSink`](crate::report::ReportingSink), fire-and-forget.

pub mod executor;
pub mod operation;
pub mod receipt;
pub mod record;
pub mod transfer;

pub use executor::Executor;
pub use operation::Operation;
pub use receipt::{Observation, OperationError, Receipt};
pub use record::{Intent, Transaction};
pub use transfer::{Transfer, TransferError, TransferRole};
