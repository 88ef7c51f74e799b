//! # Stockpile — Integral Reference Point
//!
//! An in-memory point for discrete assets: one non-negative count per asset
//! name. This is the chest, the quiver, the warehouse shelf. It stocks only
//! integral-shaped amounts; decimal-shaped amounts are another point's
//! problem (see [`Ledger`](super::ledger::Ledger)).
//!
//! One `parking_lot::Mutex` guards the whole map. Every mutating operation
//! performs its validation read and its write inside a single locked
//! section, so check-then-mutate races cannot lose updates or drive a count
//! negative. Distinct stockpiles never share state and never contend.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::asset::{Amount, Asset};

use super::capability::{
    AcceptError, Point, Queryable, Receiver, SetError, Settable, Source, SupplyError, Total,
};

const UNSUPPORTED_SHAPE: &str = "only integral amounts are stocked";

/// In-memory integral store keyed by asset fully-qualified name.
///
/// Implements all five capabilities. Absent entries are implicitly zero for
/// queries, but [`Total`] distinguishes absent (`None`) from an explicit
/// zero entry (`Some(0)`).
///
/// # Examples
///
/// ```
/// use specie_protocol::asset::Asset;
/// use specie_protocol::balance::{Queryable, Receiver, Source, Total};
/// use specie_protocol::balance::Stockpile;
///
/// let arrows = Asset::item("arrow").unwrap();
/// let chest = Stockpile::new();
///
/// chest.give(&arrows.count(10)).unwrap();
/// chest.take(&arrows.count(4)).unwrap();
/// assert_eq!(chest.total(&arrows), Some(arrows.count(6)));
/// assert!(chest.has(&arrows.count(6)));
/// assert!(!chest.has(&arrows.count(7)));
/// ```
#[derive(Debug, Default)]
pub struct Stockpile {
    counts: Mutex<HashMap<String, u64>>,
}

impl Stockpile {
    /// Creates an empty stockpile.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of assets with an entry, explicit zeros included.
    pub fn tracked_assets(&self) -> usize {
        self.counts.lock().len()
    }

    /// Whether no asset has ever been stocked. Entries are zeroed, never
    /// removed, so this stays `false` once anything has been given or set.
    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }
}

impl Queryable for Stockpile {
    fn has(&self, amount: &Amount) -> bool {
        match amount.as_integral() {
            Some(count) => {
                self.counts
                    .lock()
                    .get(&amount.asset().fqn())
                    .copied()
                    .unwrap_or(0)
                    >= count
            }
            // Decimal-shaped amounts are not stocked here; a query about
            // them is answered, not failed.
            None => false,
        }
    }
}

impl Receiver for Stockpile {
    fn give(&self, amount: &Amount) -> Result<(), AcceptError> {
        let count = amount
            .as_integral()
            .ok_or_else(|| AcceptError::new(amount, UNSUPPORTED_SHAPE))?;
        let mut counts = self.counts.lock();
        let entry = counts.entry(amount.asset().fqn()).or_insert(0);
        let updated = entry
            .checked_add(count)
            .ok_or_else(|| AcceptError::new(amount, "stored count would overflow"))?;
        *entry = updated;
        Ok(())
    }
}

impl Settable for Stockpile {
    fn set(&self, amount: &Amount) -> Result<(), SetError> {
        let count = amount
            .as_integral()
            .ok_or_else(|| SetError::new(amount, UNSUPPORTED_SHAPE))?;
        self.counts.lock().insert(amount.asset().fqn(), count);
        Ok(())
    }
}

impl Source for Stockpile {
    fn take(&self, amount: &Amount) -> Result<(), SupplyError> {
        let count = amount.as_integral().ok_or_else(|| SupplyError::Unsupported {
            amount: amount.clone(),
            reason: UNSUPPORTED_SHAPE.to_string(),
        })?;
        let mut counts = self.counts.lock();
        let fqn = amount.asset().fqn();
        let held = counts.get(&fqn).copied().unwrap_or(0);
        if held < count {
            return Err(SupplyError::Insufficient {
                requested: amount.clone(),
                available: Amount::integral(amount.asset().clone(), held),
            });
        }
        counts.insert(fqn, held - count);
        Ok(())
    }
}

impl Total for Stockpile {
    fn total(&self, asset: &Asset) -> Option<Amount> {
        self.counts
            .lock()
            .get(&asset.fqn())
            .map(|&count| Amount::integral(asset.clone(), count))
    }
}

impl Point for Stockpile {
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn arrows() -> Asset {
        Asset::item("arrow").unwrap()
    }

    #[test]
    fn fresh_stockpile_is_empty() {
        let chest = Stockpile::new();
        assert!(chest.is_empty());
        assert_eq!(chest.total(&arrows()), None);
        assert!(!chest.has(&arrows().count(1)));
    }

    #[test]
    fn give_creates_and_accumulates() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(10)).unwrap();
        chest.give(&arrows().count(5)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(15)));
    }

    #[test]
    fn give_zero_is_a_noop_credit() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(0)).unwrap();
        // The entry now exists at zero: tracked, but empty.
        assert_eq!(chest.total(&arrows()), Some(arrows().count(0)));
    }

    #[test]
    fn give_take_inverse() {
        let chest = Stockpile::new();
        chest.set(&arrows().count(3)).unwrap();
        chest.give(&arrows().count(41)).unwrap();
        chest.take(&arrows().count(41)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(3)));
    }

    #[test]
    fn give_overflow_rejected_without_mutation() {
        let chest = Stockpile::new();
        chest.set(&arrows().count(u64::MAX)).unwrap();
        let result = chest.give(&arrows().count(1));
        assert!(matches!(result, Err(AcceptError { .. })));
        assert_eq!(chest.total(&arrows()), Some(arrows().count(u64::MAX)));
    }

    #[test]
    fn set_is_absolute() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(999)).unwrap();
        chest.set(&arrows().count(7)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(7)));
        chest.set(&arrows().count(0)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(0)));
    }

    #[test]
    fn take_checks_and_decrements_atomically() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(10)).unwrap();
        chest.take(&arrows().count(4)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(6)));
    }

    #[test]
    fn take_insufficiency_leaves_state_unchanged() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(6)).unwrap();

        let result = chest.take(&arrows().count(100));
        match result {
            Err(SupplyError::Insufficient {
                requested,
                available,
            }) => {
                assert_eq!(requested, arrows().count(100));
                assert_eq!(available, arrows().count(6));
            }
            other => panic!("expected insufficiency, got {other:?}"),
        }
        assert_eq!(chest.total(&arrows()), Some(arrows().count(6)));

        // Failure is idempotent: once refilled, the same take goes through.
        chest.give(&arrows().count(94)).unwrap();
        chest.take(&arrows().count(100)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(0)));
    }

    #[test]
    fn take_from_untracked_asset_reports_zero_available() {
        let chest = Stockpile::new();
        let result = chest.take(&arrows().count(1));
        assert!(matches!(
            result,
            Err(SupplyError::Insufficient { available, .. }) if available == arrows().count(0)
        ));
    }

    #[test]
    fn decimal_shapes_are_unsupported() {
        let chest = Stockpile::new();
        let weighed = arrows().worth(dec!(2.5)).unwrap();

        assert!(!chest.has(&weighed));
        assert!(matches!(chest.give(&weighed), Err(AcceptError { .. })));
        assert!(matches!(chest.set(&weighed), Err(SetError { .. })));
        assert!(matches!(
            chest.take(&weighed),
            Err(SupplyError::Unsupported { .. })
        ));
        assert!(chest.is_empty());
    }

    #[test]
    fn query_total_agreement() {
        let chest = Stockpile::new();
        chest.give(&arrows().count(8)).unwrap();

        for n in 0..=9 {
            let agree = chest
                .total(&arrows())
                .map(|total| total.magnitude() >= arrows().count(n).magnitude())
                .unwrap_or(false);
            assert_eq!(chest.has(&arrows().count(n)), agree, "disagreement at {n}");
        }
    }

    #[test]
    fn assets_do_not_interfere() {
        let chest = Stockpile::new();
        let bolts = Asset::item("bolt").unwrap();
        chest.give(&arrows().count(5)).unwrap();
        chest.give(&bolts.count(2)).unwrap();

        chest.take(&bolts.count(2)).unwrap();
        assert_eq!(chest.total(&arrows()), Some(arrows().count(5)));
        assert_eq!(chest.tracked_assets(), 2);
    }
}
