//! # Operations
//!
//! The five things a transaction can intend, each bound at definition time
//! to the one capability it requires. The binding is data, not reflection:
//! the executor reads [`Operation::required_capability`] and asks the point
//! whether it declares that capability, and that is the whole dispatch
//! validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::balance::Capability;

/// Classification of a transaction's intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// A point is checked for an amount (yes or no only).
    Query,
    /// A point is given an amount.
    Give,
    /// An amount is set for a point.
    Set,
    /// An amount is taken from a point.
    Take,
    /// A point is asked for its total of an asset.
    Total,
}

impl Operation {
    /// Every operation, in protocol order.
    pub const ALL: [Operation; 5] = [
        Operation::Query,
        Operation::Give,
        Operation::Set,
        Operation::Take,
        Operation::Total,
    ];

    /// The capability a point must expose for this operation to execute.
    pub fn required_capability(self) -> Capability {
        match self {
            Operation::Query => Capability::Query,
            Operation::Give => Capability::Give,
            Operation::Set => Capability::Set,
            Operation::Take => Capability::Take,
            Operation::Total => Capability::Total,
        }
    }

    /// Whether transactions of this operation carry an amount. TOTAL is the
    /// only one that names a bare asset instead.
    pub fn bears_amount(self) -> bool {
        !matches!(self, Operation::Total)
    }

    /// Whether this operation can change a point's state.
    pub fn mutates(self) -> bool {
        matches!(self, Operation::Give | Operation::Set | Operation::Take)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Query => "QUERY",
            Operation::Give => "GIVE",
            Operation::Set => "SET",
            Operation::Take => "TAKE",
            Operation::Total => "TOTAL",
        };
        write!(f, "{name}")
    }
}
