//! # Transaction Records
//!
//! A [`Transaction`] is the immutable description of an *attempt*: which
//! operation, against what asset, for how much, on whose behalf. It says
//! nothing about what happened — outcomes live on the
//! [`Receipt`](super::receipt::Receipt) produced when the attempt
//! concludes.
//!
//! The payload is an [`Intent`]: a tagged variant per operation, carrying
//! the amount for the amount-bearing ones and the bare asset for TOTAL.
//! Because an amount already knows its asset, a transaction whose amount
//! and asset disagree cannot be constructed at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::{Amount, Asset};
use crate::party::PartyId;

use super::operation::Operation;

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// An operation together with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Check whether a point holds at least the amount.
    Query(Amount),
    /// Credit the amount to a point.
    Give(Amount),
    /// Pin a point's holding to exactly the amount.
    Set(Amount),
    /// Debit the amount from a point.
    Take(Amount),
    /// Read a point's full holding of the asset.
    Total(Asset),
}

impl Intent {
    /// The operation tag for this intent.
    pub fn operation(&self) -> Operation {
        match self {
            Intent::Query(_) => Operation::Query,
            Intent::Give(_) => Operation::Give,
            Intent::Set(_) => Operation::Set,
            Intent::Take(_) => Operation::Take,
            Intent::Total(_) => Operation::Total,
        }
    }

    /// The asset involved. For amount-bearing intents this is the amount's
    /// own asset — the two cannot diverge.
    pub fn asset(&self) -> &Asset {
        match self {
            Intent::Query(amount)
            | Intent::Give(amount)
            | Intent::Set(amount)
            | Intent::Take(amount) => amount.asset(),
            Intent::Total(asset) => asset,
        }
    }

    /// The amount, for the amount-bearing intents.
    pub fn amount(&self) -> Option<&Amount> {
        match self {
            Intent::Query(amount)
            | Intent::Give(amount)
            | Intent::Set(amount)
            | Intent::Take(amount) => Some(amount),
            Intent::Total(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Immutable record of an attempted operation.
///
/// Created by the caller before executing against a point; never mutated
/// afterwards. Participants are referenced by identity only — the record
/// does not resolve or own them.
///
/// # Examples
///
/// ```
/// use specie_protocol::asset::Asset;
/// use specie_protocol::party::PartyId;
/// use specie_protocol::transaction::{Operation, Transaction};
///
/// let gold = Asset::currency("gold").unwrap();
/// let alice = PartyId::player("alice").unwrap();
///
/// let tx = Transaction::give(gold.count(25), [alice]).with_note("quest reward");
/// assert_eq!(tx.operation(), Operation::Give);
/// assert_eq!(tx.asset(), &gold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    intent: Intent,
    parties: Vec<PartyId>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl Transaction {
    fn record(intent: Intent, parties: impl Into<Vec<PartyId>>) -> Self {
        Self {
            intent,
            parties: parties.into(),
            note: None,
            created_at: Utc::now(),
        }
    }

    /// A QUERY intent: does the point hold at least `amount`?
    pub fn query(amount: Amount, parties: impl Into<Vec<PartyId>>) -> Self {
        Self::record(Intent::Query(amount), parties)
    }

    /// A GIVE intent: credit `amount` to the point.
    pub fn give(amount: Amount, parties: impl Into<Vec<PartyId>>) -> Self {
        Self::record(Intent::Give(amount), parties)
    }

    /// A SET intent: pin the point's holding to `amount`.
    pub fn set(amount: Amount, parties: impl Into<Vec<PartyId>>) -> Self {
        Self::record(Intent::Set(amount), parties)
    }

    /// A TAKE intent: debit `amount` from the point.
    pub fn take(amount: Amount, parties: impl Into<Vec<PartyId>>) -> Self {
        Self::record(Intent::Take(amount), parties)
    }

    /// A TOTAL intent: read the point's holding of `asset`.
    pub fn total(asset: Asset, parties: impl Into<Vec<PartyId>>) -> Self {
        Self::record(Intent::Total(asset), parties)
    }

    /// Attaches a free-form note for downstream logging.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The intent, payload included.
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// The operation tag.
    pub fn operation(&self) -> Operation {
        self.intent.operation()
    }

    /// The asset involved.
    pub fn asset(&self) -> &Asset {
        self.intent.asset()
    }

    /// The amount, absent for TOTAL.
    pub fn amount(&self) -> Option<&Amount> {
        self.intent.amount()
    }

    /// The participating parties, primary first by convention.
    pub fn parties(&self) -> &[PartyId] {
        &self.parties
    }

    /// The attached note, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// When the record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{} {}", self.operation(), amount)?,
            None => write!(f, "{} {}", self.operation(), self.asset())?,
        }
        if !self.parties.is_empty() {
            write!(f, " [")?;
            for (i, party) in self.parties.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{party}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Asset {
        Asset::currency("gold").unwrap()
    }

    fn alice() -> PartyId {
        PartyId::player("alice").unwrap()
    }

    #[test]
    fn amount_and_asset_cannot_diverge() {
        let tx = Transaction::give(gold().count(25), [alice()]);
        assert_eq!(tx.asset(), tx.amount().unwrap().asset());
    }

    #[test]
    fn total_bears_no_amount() {
        let tx = Transaction::total(gold(), [alice()]);
        assert_eq!(tx.operation(), Operation::Total);
        assert_eq!(tx.amount(), None);
        assert_eq!(tx.asset(), &gold());
    }

    #[test]
    fn parties_are_kept_in_order() {
        let bob = PartyId::player("bob").unwrap();
        let tx = Transaction::take(gold().count(5), vec![alice(), bob.clone()]);
        assert_eq!(tx.parties(), &[alice(), bob]);
    }

    #[test]
    fn note_rides_along() {
        let tx = Transaction::set(gold().count(0), [alice()]).with_note("season reset");
        assert_eq!(tx.note(), Some("season reset"));
    }

    #[test]
    fn display_reads_like_an_audit_line() {
        let tx = Transaction::give(gold().count(25), [alice()]);
        assert_eq!(tx.to_string(), "GIVE 25 currency:gold [player:alice]");

        let tx = Transaction::total(gold(), vec![]);
        assert_eq!(tx.to_string(), "TOTAL currency:gold");
    }

    #[test]
    fn serde_round_trip() {
        let tx = Transaction::query(gold().count(10), [alice()]).with_note("balance check");
        let json = serde_json::to_string(&tx).unwrap();
        let recovered: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, recovered);
    }
}
