//! # Balance Module — Holding Value at a Point
//!
//! The balance capability protocol and its reference implementations.
//!
//! ```text
//! capability.rs — The five capability traits, the Point declaration
//!                 surface, and the typed refusal errors
//! store.rs      — Stockpile: mutex-guarded integral store (items)
//! ledger.rs     — Ledger: mutex-guarded decimal store (currency)
//! ```
//!
//! ## Concurrency Contract
//!
//! Each point makes its own mutations atomic, including the validation
//! reads they depend on (a take's check-then-decrement is one step). There
//! is no cross-point locking anywhere — operations on different points
//! never contend, and multi-point consistency is a host concern (see
//! [`Transfer`](crate::transaction::Transfer) for the two-point case).

pub mod capability;
pub mod ledger;
pub mod store;

pub use capability::{
    AcceptError, Balance, Capability, Point, Queryable, Receiver, SetError, Settable, Source,
    SupplyError, Total,
};
pub use ledger::Ledger;
pub use store::Stockpile;
