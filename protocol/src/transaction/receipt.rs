//! # Receipts
//!
//! A [`Receipt`] is the immutable outcome of executing a transaction:
//! created exactly once, at the moment the attempt concludes, and never
//! revised. It carries a unique execution id suitable as a dedup and audit
//! key, the originating [`Transaction`], the typed error when there was
//! one, and whatever the operation observed.
//!
//! ## What "success" means
//!
//! `success` is uniform across operations: **the operation executed without
//! a typed error**. A QUERY that ran and answered "no" is a successful
//! receipt carrying [`Observation::Held`] with `false`; a TOTAL against an
//! asset the point never tracked is a successful receipt carrying
//! [`Observation::Total`] with `None`. Only refusals — unsupported assets,
//! insufficient supply, missing capabilities — make a receipt a failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::asset::Amount;
use crate::balance::{AcceptError, Capability, SetError, SupplyError};

use super::operation::Operation;
use super::record::Transaction;

// ---------------------------------------------------------------------------
// OperationError
// ---------------------------------------------------------------------------

/// The full taxonomy of execution failures, as carried by receipts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OperationError {
    /// A GIVE was refused.
    #[error(transparent)]
    Accept(#[from] AcceptError),

    /// A SET was refused.
    #[error(transparent)]
    Set(#[from] SetError),

    /// A TAKE was refused.
    #[error(transparent)]
    Supply(#[from] SupplyError),

    /// The operation was attempted against a point that does not declare
    /// the required capability. Nothing was invoked on the point.
    #[error("{operation} requires the {capability} capability, which the point does not expose")]
    CapabilityMismatch {
        /// The operation that was attempted.
        operation: Operation,
        /// The capability the operation is bound to.
        capability: Capability,
    },
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Operation-specific data observed by a successful read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    /// QUERY's answer: whether the point held the amount.
    Held(bool),
    /// TOTAL's answer: the holding at execution time, absent when the point
    /// tracked nothing for the asset.
    Total(Option<Amount>),
}

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// Immutable outcome of one transaction attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    id: Uuid,
    transaction: Transaction,
    error: Option<OperationError>,
    success: bool,
    observation: Option<Observation>,
    completed_at: DateTime<Utc>,
}

impl Receipt {
    fn conclude(
        transaction: Transaction,
        error: Option<OperationError>,
        observation: Option<Observation>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            success: error.is_none(),
            transaction,
            error,
            observation,
            completed_at: Utc::now(),
        }
    }

    /// A successful mutation (GIVE, SET, TAKE) — nothing observed, nothing
    /// refused.
    pub fn succeeded(transaction: Transaction) -> Self {
        Self::conclude(transaction, None, None)
    }

    /// A successful read (QUERY, TOTAL) with what it observed.
    pub fn observed(transaction: Transaction, observation: Observation) -> Self {
        Self::conclude(transaction, None, Some(observation))
    }

    /// A refused attempt.
    pub fn failed(transaction: Transaction, error: OperationError) -> Self {
        Self::conclude(transaction, Some(error), None)
    }

    /// The unique execution id, assigned when the attempt concluded.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The originating transaction.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The typed error, when the attempt was refused.
    pub fn error(&self) -> Option<&OperationError> {
        self.error.as_ref()
    }

    /// Whether the operation executed without a typed error. See the module
    /// docs for the exact meaning — a "no" answer is still a success.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// What a successful read observed, absent for mutations and failures.
    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    /// When the attempt concluded.
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::party::PartyId;

    fn gold() -> Asset {
        Asset::currency("gold").unwrap()
    }

    fn give_tx() -> Transaction {
        Transaction::give(gold().count(5), [PartyId::player("alice").unwrap()])
    }

    #[test]
    fn success_and_error_agree() {
        let ok = Receipt::succeeded(give_tx());
        assert!(ok.is_success());
        assert!(ok.error().is_none());

        let error = OperationError::Accept(AcceptError::new(&gold().count(5), "closed"));
        let failed = Receipt::failed(give_tx(), error);
        assert!(!failed.is_success());
        assert!(failed.error().is_some());
    }

    #[test]
    fn negative_query_answers_are_successes() {
        let tx = Transaction::query(gold().count(1_000_000), vec![]);
        let receipt = Receipt::observed(tx, Observation::Held(false));
        assert!(receipt.is_success());
        assert_eq!(receipt.observation(), Some(&Observation::Held(false)));
    }

    #[test]
    fn absent_totals_are_successes() {
        let tx = Transaction::total(gold(), vec![]);
        let receipt = Receipt::observed(tx, Observation::Total(None));
        assert!(receipt.is_success());
        assert_eq!(receipt.observation(), Some(&Observation::Total(None)));
    }

    #[test]
    fn execution_ids_are_unique_per_attempt() {
        let a = Receipt::succeeded(give_tx());
        let b = Receipt::succeeded(give_tx());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn capability_mismatch_names_both_sides() {
        let error = OperationError::CapabilityMismatch {
            operation: Operation::Take,
            capability: Operation::Take.required_capability(),
        };
        assert_eq!(
            error.to_string(),
            "TAKE requires the source capability, which the point does not expose"
        );
    }

    #[test]
    fn serde_round_trip() {
        let receipt = Receipt::failed(
            give_tx(),
            OperationError::Supply(SupplyError::Insufficient {
                requested: gold().count(5),
                available: gold().count(2),
            }),
        );
        let json = serde_json::to_string(&receipt).unwrap();
        let recovered: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, recovered);
        assert_eq!(receipt.id(), recovered.id());
    }
}
