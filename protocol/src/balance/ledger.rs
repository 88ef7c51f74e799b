//! # Ledger — Decimal Reference Point
//!
//! An in-memory point for divisible assets: one non-negative decimal
//! holding per asset. This is the wallet, the till, the treasury. Unlike
//! the integral [`Stockpile`](super::store::Stockpile), a ledger accepts
//! both magnitude shapes — an integral `5` credits the same as a decimal
//! `5.00` — because divisible holdings subsume counts.
//!
//! The concurrency discipline is the same: one `parking_lot::Mutex` over
//! the whole map, validation and write in a single locked section.

use std::collections::HashMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::asset::{Amount, Asset};

use super::capability::{
    AcceptError, Point, Queryable, Receiver, SetError, Settable, Source, SupplyError, Total,
};

/// In-memory decimal store keyed by [`Asset`].
///
/// Implements all five capabilities for amounts of any shape. Holdings are
/// non-negative by construction: credits add non-negative magnitudes,
/// debits never pass the sufficiency check with a shortfall, and sets store
/// amounts that were validated at their own construction.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use specie_protocol::asset::Asset;
/// use specie_protocol::balance::{Ledger, Receiver, Source, Total};
///
/// let gold = Asset::currency("gold").unwrap();
/// let wallet = Ledger::new();
///
/// wallet.give(&gold.worth(Decimal::new(125, 1)).unwrap()).unwrap(); // 12.5
/// wallet.take(&gold.count(2)).unwrap();
/// let total = wallet.total(&gold).unwrap();
/// assert_eq!(total.magnitude(), Decimal::new(105, 1)); // 10.5
/// ```
#[derive(Debug, Default)]
pub struct Ledger {
    holdings: Mutex<HashMap<Asset, Decimal>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of assets with an entry, explicit zeros included.
    pub fn tracked_assets(&self) -> usize {
        self.holdings.lock().len()
    }

    /// Whether no asset has ever been credited or set.
    pub fn is_empty(&self) -> bool {
        self.holdings.lock().is_empty()
    }
}

impl Queryable for Ledger {
    fn has(&self, amount: &Amount) -> bool {
        self.holdings
            .lock()
            .get(amount.asset())
            .copied()
            .unwrap_or(Decimal::ZERO)
            >= amount.magnitude()
    }
}

impl Receiver for Ledger {
    fn give(&self, amount: &Amount) -> Result<(), AcceptError> {
        let mut holdings = self.holdings.lock();
        let entry = holdings.entry(amount.asset().clone()).or_insert(Decimal::ZERO);
        let updated = entry
            .checked_add(amount.magnitude())
            .ok_or_else(|| AcceptError::new(amount, "holding would overflow"))?;
        *entry = updated;
        Ok(())
    }
}

impl Settable for Ledger {
    fn set(&self, amount: &Amount) -> Result<(), SetError> {
        self.holdings
            .lock()
            .insert(amount.asset().clone(), amount.magnitude());
        Ok(())
    }
}

impl Source for Ledger {
    fn take(&self, amount: &Amount) -> Result<(), SupplyError> {
        let mut holdings = self.holdings.lock();
        let held = holdings
            .get(amount.asset())
            .copied()
            .unwrap_or(Decimal::ZERO);
        let requested = amount.magnitude();
        if held < requested {
            return Err(SupplyError::Insufficient {
                requested: amount.clone(),
                available: available_amount(amount.asset(), held),
            });
        }
        holdings.insert(amount.asset().clone(), held - requested);
        Ok(())
    }
}

impl Total for Ledger {
    fn total(&self, asset: &Asset) -> Option<Amount> {
        self.holdings
            .lock()
            .get(asset)
            .and_then(|&held| Amount::decimal(asset.clone(), held).ok())
    }
}

impl Point for Ledger {
    fn as_queryable(&self) -> Option<&dyn Queryable> {
        Some(self)
    }

    fn as_receiver(&self) -> Option<&dyn Receiver> {
        Some(self)
    }

    fn as_settable(&self) -> Option<&dyn Settable> {
        Some(self)
    }

    fn as_source(&self) -> Option<&dyn Source> {
        Some(self)
    }

    fn as_total(&self) -> Option<&dyn Total> {
        Some(self)
    }
}

/// Wraps a stored holding as an amount. Holdings are non-negative by the
/// ledger's invariant, so construction cannot fail; a zero stands in if the
/// invariant were ever broken rather than panicking in an error path.
fn available_amount(asset: &Asset, held: Decimal) -> Amount {
    Amount::decimal(asset.clone(), held)
        .unwrap_or_else(|_| Amount::integral(asset.clone(), 0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
