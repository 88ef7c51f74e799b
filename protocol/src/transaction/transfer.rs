//! # Transfers
//!
//! The one composed movement the protocol ships: take an amount from one
//! point, give it to another. The two legs are ordinary capability calls —
//! each atomic at its own point — so a transfer is *not* atomic across
//! both points, and the error taxonomy says precisely how far an attempt
//! got.
//!
//! When the give leg fails after a successful take, the amount is refunded
//! to the source — but only when the source also declares the [`Receiver`]
//! capability (a drop-only source cannot be refunded). The outcome names
//! make the three partial states unambiguous for the host: not sent, sent
//! but held in limbo with the sender refunded, or sent and stranded.
//!
//! [`Receiver`]: crate::balance::Receiver

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::asset::Amount;
use crate::balance::{AcceptError, Capability, Point, SupplyError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which end of a transfer an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferRole {
    /// The point the amount moves out of.
    Sender,
    /// The point the amount moves into.
    Receiver,
}

impl fmt::Display for TransferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferRole::Sender => "sender",
            TransferRole::Receiver => "receiver",
        };
        write!(f, "{name}")
    }
}

/// How a transfer attempt failed, ordered by how far it got.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TransferError {
    /// An endpoint does not declare the capability its role requires.
    /// Checked before any mutation; nothing moved.
    #[error("the {role} endpoint does not expose the {capability} capability")]
    MissingCapability {
        /// The endpoint at fault.
        role: TransferRole,
        /// The capability that role requires.
        capability: Capability,
    },

    /// The take leg failed; nothing moved.
    #[error("not sent: {0}")]
    TakeFailed(SupplyError),

    /// The give leg failed and the source cannot receive a refund. The
    /// amount has left the source and reached nowhere.
    #[error("sent but not received: {0}")]
    GiveFailed(AcceptError),

    /// The give leg failed and the amount was returned to the source.
    #[error("sent but not received; sender refunded: {0}")]
    GiveFailedTakeReversed(AcceptError),

    /// The give leg failed and so did the refund. The amount has left the
    /// source and reached nowhere.
    #[error("sent but not received; sender not refunded: {0}")]
    GiveFailedTakeHolds(AcceptError),
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// A single-asset movement between two points.
///
/// # Examples
///
/// ```
/// use specie_protocol::asset::Asset;
/// use specie_protocol::balance::{Stockpile, Total};
/// use specie_protocol::transaction::Transfer;
///
/// use specie_protocol::balance::Receiver;
///
/// let arrows = Asset::item("arrow").unwrap();
/// let chest = Stockpile::new();
/// let quiver = Stockpile::new();
/// chest.give(&arrows.count(10)).unwrap();
///
/// let four = arrows.count(4);
/// Transfer::new(&four, &chest, &quiver).execute().unwrap();
/// assert_eq!(chest.total(&arrows), Some(arrows.count(6)));
/// assert_eq!(quiver.total(&arrows), Some(arrows.count(4)));
/// ```
#[derive(Clone, Copy)]
pub struct Transfer<'a> {
    amount: &'a Amount,
    source: &'a dyn Point,
    receiver: &'a dyn Point,
}

impl<'a> Transfer<'a> {
    /// Describes a movement of `amount` out of `source` into `receiver`.
    /// Nothing happens until [`execute`](Self::execute).
    pub fn new(amount: &'a Amount, source: &'a dyn Point, receiver: &'a dyn Point) -> Self {
        Self {
            amount,
            source,
            receiver,
        }
    }

    /// The amount being moved.
    pub fn amount(&self) -> &Amount {
        self.amount
    }

    /// Runs the movement: take from the source, give to the receiver,
    /// refund the source when the give fails and the source can accept.
    pub fn execute(&self) -> Result<(), TransferError> {
        let source = self
            .source
            .as_source()
            .ok_or(TransferError::MissingCapability {
                role: TransferRole::Sender,
                capability: Capability::Take,
            })?;
        let receiver = self
            .receiver
            .as_receiver()
            .ok_or(TransferError::MissingCapability {
                role: TransferRole::Receiver,
                capability: Capability::Give,
            })?;

        source.take(self.amount).map_err(TransferError::TakeFailed)?;

        match receiver.give(self.amount) {
            Ok(()) => Ok(()),
            Err(give_error) => match self.source.as_receiver() {
                Some(refundable) => match refundable.give(self.amount) {
                    Ok(()) => Err(TransferError::GiveFailedTakeReversed(give_error)),
                    Err(_) => Err(TransferError::GiveFailedTakeHolds(give_error)),
                },
                None => Err(TransferError::GiveFailed(give_error)),
            },
        }
    }

    /// Runs the opposite movement: the original receiver becomes the
    /// sender. Requires the reciprocal capabilities at each endpoint.
    pub fn reverse(&self) -> Result<(), TransferError> {
        Transfer::new(self.amount, self.receiver, self.source).execute()
    }
}

impl fmt::Debug for Transfer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transfer")
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::balance::{Receiver, Source, Stockpile, Total};

    fn arrows() -> Asset {
        Asset::item("arrow").unwrap()
    }

    /// A receiver that refuses everything — a full warehouse.
    struct Refusing;

    impl Receiver for Refusing {
        fn give(&self, amount: &Amount) -> Result<(), AcceptError> {
            Err(AcceptError::new(amount, "no room"))
        }
    }

    impl Point for Refusing {
        fn as_receiver(&self) -> Option<&dyn Receiver> {
            Some(self)
        }
    }

    /// A source that supplies but cannot take anything back.
    struct OneWayTap {
        inner: Stockpile,
    }

    impl Source for OneWayTap {
        fn take(&self, amount: &Amount) -> Result<(), SupplyError> {
            self.inner.take(amount)
        }
    }

    impl Point for OneWayTap {
        fn as_source(&self) -> Option<&dyn Source> {
            Some(self)
        }
    }

    #[test]
    fn successful_transfer_moves_the_amount() {
        let chest = Stockpile::new();
        let quiver = Stockpile::new();
        chest.give(&arrows().count(10)).unwrap();

        let amount = arrows().count(4);
        Transfer::new(&amount, &chest, &quiver).execute().unwrap();

        assert_eq!(chest.total(&arrows()), Some(arrows().count(6)));
        assert_eq!(quiver.total(&arrows()), Some(arrows().count(4)));
    }

    #[test]
    fn take_failure_moves_nothing() {
        let chest = Stockpile::new();
        let quiver = Stockpile::new();
        chest.give(&arrows().count(2)).unwrap();

        let amount = arrows().count(5);
        let result = Transfer::new(&amount, &chest, &quiver).execute();

        assert!(matches!(result, Err(TransferError::TakeFailed(_))));
        assert_eq!(chest.total(&arrows()), Some(arrows().count(2)));
        assert_eq!(quiver.total(&arrows()), None);
    }

    #[test]
    fn refused_give_refunds_a_refundable_source() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(10)).unwrap();
        let warehouse = Refusing;

        let amount = arrows().count(3);
        let result = Transfer::new(&amount, &chest, &warehouse).execute();

        assert!(matches!(
            result,
            Err(TransferError::GiveFailedTakeReversed(_))
        ));
        assert_eq!(chest.total(&arrows()), Some(arrows().count(10)));
    }

    #[test]
    fn refused_give_strands_when_source_cannot_accept() {
        let tap = OneWayTap {
            inner: Stockpile::new(),
        };
        tap.inner.give(&arrows().count(10)).unwrap();
        let warehouse = Refusing;

        let amount = arrows().count(3);
        let result = Transfer::new(&amount, &tap, &warehouse).execute();

        assert!(matches!(result, Err(TransferError::GiveFailed(_))));
        // The take leg holds: the tap really is three arrows lighter.
        assert_eq!(tap.inner.total(&arrows()), Some(arrows().count(7)));
    }

    #[test]
    fn endpoints_are_capability_checked_before_any_mutation() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(5)).unwrap();
        let readonly = ReadOnly;

        let amount = arrows().count(1);
        let result = Transfer::new(&amount, &readonly, &chest).execute();
        assert!(matches!(
            result,
            Err(TransferError::MissingCapability {
                role: TransferRole::Sender,
                capability: Capability::Take,
            })
        ));

        let result = Transfer::new(&amount, &chest, &readonly).execute();
        assert!(matches!(
            result,
            Err(TransferError::MissingCapability {
                role: TransferRole::Receiver,
                capability: Capability::Give,
            })
        ));
        assert_eq!(chest.total(&arrows()), Some(arrows().count(5)));
    }

    #[test]
    fn reverse_runs_the_opposite_movement() {
        let chest = Stockpile::new();
        let quiver = Stockpile::new();
        chest.give(&arrows().count(10)).unwrap();

        let amount = arrows().count(4);
        let transfer = Transfer::new(&amount, &chest, &quiver);
        transfer.execute().unwrap();
        transfer.reverse().unwrap();

        assert_eq!(chest.total(&arrows()), Some(arrows().count(10)));
        assert_eq!(quiver.total(&arrows()), Some(arrows().count(0)));
    }

    /// A point with no capabilities at all.
    struct ReadOnly;

    impl Point for ReadOnly {}
}
