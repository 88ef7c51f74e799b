//! # Balance Capabilities
//!
//! What it means to hold value at a point, split into five independent,
//! single-method capabilities. A point implements exactly the subset it
//! semantically supports: a read-only ledger view is [`Queryable`] +
//! [`Total`] and nothing else; a sink that only collects taxes is just a
//! [`Receiver`]. Callers program against the minimal capability they need.
//!
//! All methods take `&self`: a point owns its interior mutability and is
//! responsible for making its own mutations atomic (see the reference
//! implementations in this module's siblings). Capability calls complete
//! synchronously — a point backed by slow storage must hide that latency
//! behind its own policy, outside this contract.
//!
//! [`Point`] is how a point *declares* its subset: override the accessor
//! for each supported capability. The transaction executor consults these
//! declarations before dispatch, so an unsupported operation fails fast
//! without probing concrete types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::{Amount, Asset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A point refused to accept an amount it was given.
///
/// Raised for asset kinds or magnitude shapes the point does not track, and
/// for credits that would overflow its storage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("cannot accept {amount}: {reason}")]
pub struct AcceptError {
    /// The amount that was refused.
    pub amount: Amount,
    /// Human-readable refusal reason.
    pub reason: String,
}

impl AcceptError {
    /// Creates an accept error for `amount` with the given reason.
    pub fn new(amount: &Amount, reason: impl Into<String>) -> Self {
        Self {
            amount: amount.clone(),
            reason: reason.into(),
        }
    }
}

/// A point refused to set a holding to an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("cannot set {amount}: {reason}")]
pub struct SetError {
    /// The amount that was refused.
    pub amount: Amount,
    /// Human-readable refusal reason.
    pub reason: String,
}

impl SetError {
    /// Creates a set error for `amount` with the given reason.
    pub fn new(amount: &Amount, reason: impl Into<String>) -> Self {
        Self {
            amount: amount.clone(),
            reason: reason.into(),
        }
    }
}

/// A point could not supply an amount that was to be taken from it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SupplyError {
    /// The point holds less than was requested. No mutation occurred; the
    /// same take succeeds once the holding reaches the requested value.
    #[error("insufficient supply: requested {requested}, available {available}")]
    Insufficient {
        /// The amount that was requested.
        requested: Amount,
        /// The holding at the moment the take was refused.
        available: Amount,
    },

    /// The asset kind or magnitude shape is not tracked by this point.
    #[error("cannot draw {amount}: {reason}")]
    Unsupported {
        /// The amount that was refused.
        amount: Amount,
        /// Human-readable refusal reason.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// The Five Capabilities
// ---------------------------------------------------------------------------

/// Answering whether an amount is held. Never mutates.
pub trait Queryable {
    /// Whether this point currently holds at least `amount`.
    ///
    /// Unsupported asset kinds or magnitude shapes answer `false` rather
    /// than failing — absence is a valid answer for a non-mutating query.
    fn has(&self, amount: &Amount) -> bool;
}

/// Accepting amounts into the point's holdings.
pub trait Receiver {
    /// Increases this point's holding of `amount.asset()` by the amount's
    /// magnitude, creating the holding if absent.
    fn give(&self, amount: &Amount) -> Result<(), AcceptError>;
}

/// Replacing a holding outright.
pub trait Settable {
    /// Sets this point's holding of `amount.asset()` to exactly the
    /// amount's magnitude, regardless of prior state.
    fn set(&self, amount: &Amount) -> Result<(), SetError>;
}

/// Supplying amounts out of the point's holdings.
pub trait Source {
    /// Decreases this point's holding of `amount.asset()` by the amount's
    /// magnitude. The sufficiency check and the decrement are one atomic
    /// step; on failure the holding is untouched.
    fn take(&self, amount: &Amount) -> Result<(), SupplyError>;
}

/// Reporting a holding in full.
pub trait Total {
    /// This point's current holding of `asset`, or `None` when the point
    /// tracks nothing for it. An explicit zero holding is `Some(0)` —
    /// absent and zero are different answers.
    fn total(&self, asset: &Asset) -> Option<Amount>;
}

/// The full set: a point that can do everything.
///
/// Blanket-implemented; never implement it directly.
pub trait Balance: Queryable + Receiver + Settable + Source + Total {}

impl<T: Queryable + Receiver + Settable + Source + Total> Balance for T {}

// ---------------------------------------------------------------------------
// Capability Tag
// ---------------------------------------------------------------------------

/// Tag naming one of the five capabilities. Operations bind to the tag of
/// the capability they require, and mismatch errors report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// [`Queryable`]
    Query,
    /// [`Receiver`]
    Give,
    /// [`Settable`]
    Set,
    /// [`Source`]
    Take,
    /// [`Total`]
    Total,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Query => "queryable",
            Capability::Give => "receiver",
            Capability::Set => "settable",
            Capability::Take => "source",
            Capability::Total => "total",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A point of account: anything that exposes one or more balance
/// capabilities for some set of assets.
///
/// The default for every accessor is `None`; a point overrides exactly the
/// ones it supports. This declaration is the dispatch surface — the
/// executor asks, it never downcasts.
pub trait Point: Send + Sync {
    /// This point's [`Queryable`] capability, if supported.
    fn as_queryable(&self) -> Option<&dyn Queryable> {
        None
    }

    /// This point's [`Receiver`] capability, if supported.
    fn as_receiver(&self) -> Option<&dyn Receiver> {
        None
    }

    /// This point's [`Settable`] capability, if supported.
    fn as_settable(&self) -> Option<&dyn Settable> {
        None
    }

    /// This point's [`Source`] capability, if supported.
    fn as_source(&self) -> Option<&dyn Source> {
        None
    }

    /// This point's [`Total`] capability, if supported.
    fn as_total(&self) -> Option<&dyn Total> {
        None
    }

    /// Whether this point exposes `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Query => self.as_queryable().is_some(),
            Capability::Give => self.as_receiver().is_some(),
            Capability::Set => self.as_settable().is_some(),
            Capability::Take => self.as_source().is_some(),
            Capability::Total => self.as_total().is_some(),
        }
    }

    /// The capabilities this point currently exposes.
    fn capabilities(&self) -> Vec<Capability> {
        [
            Capability::Query,
            Capability::Give,
            Capability::Set,
            Capability::Take,
            Capability::Total,
        ]
        .into_iter()
        .filter(|&capability| self.supports(capability))
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
