//! # Amounts
//!
//! An [`Amount`] is a non-negative magnitude of exactly one [`Asset`].
//! Magnitudes come in two shapes: integral counts for discrete assets
//! (arrows in a quiver) and arbitrary-precision decimals for divisible ones
//! (coins in a purse). No floating point anywhere near value.
//!
//! The only validation an amount performs is at construction: a negative
//! decimal is refused with [`AmountError::Negative`]. Every `Amount` that
//! exists is non-negative, so points never re-check.
//!
//! Cross-shape comparison goes through the normalized decimal view:
//! an integral `5` and a decimal `5.00` of the same asset are equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::identity::Asset;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AmountError {
    /// A decimal magnitude below zero was supplied.
    #[error("negative magnitude {magnitude} for asset {asset}")]
    Negative {
        /// The asset the amount was meant for.
        asset: Asset,
        /// The rejected magnitude.
        magnitude: Decimal,
    },
}

// ---------------------------------------------------------------------------
// Magnitude
// ---------------------------------------------------------------------------

/// The shape of an amount's magnitude.
///
/// The shape matters to points: an integral store stocks only
/// [`Magnitude::Integral`] amounts and treats decimal-shaped amounts as
/// unsupported, while a decimal ledger accepts both through the normalized
/// view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Magnitude {
    /// A discrete count of a countable asset.
    Integral(u64),
    /// An arbitrary-precision value of a divisible asset. Non-negative by
    /// construction.
    Decimal(Decimal),
}

impl Magnitude {
    /// The normalized decimal view: integral counts exactly as-is, decimals
    /// with trailing zeros stripped. `5`, `5.0` and `5.00` all normalize to
    /// the same value.
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Magnitude::Integral(count) => Decimal::from(*count),
            Magnitude::Decimal(value) => value.normalize(),
        }
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A non-negative magnitude of one asset. Immutable value data.
///
/// Equality and hashing require the same asset and the same numeric value
/// under the normalized decimal view, regardless of shape.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use specie_protocol::asset::{Amount, Asset};
///
/// let arrows = Asset::item("arrow").unwrap();
/// let five = Amount::integral(arrows.clone(), 5);
/// assert_eq!(five.magnitude(), Decimal::from(5));
///
/// let gold = Asset::currency("gold").unwrap();
/// let negative = Amount::decimal(gold, Decimal::from(-1));
/// assert!(negative.is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amount {
    asset: Asset,
    magnitude: Magnitude,
}

impl Amount {
    /// Creates an integral amount. Infallible: a `u64` count cannot be
    /// negative.
    pub fn integral(asset: Asset, count: u64) -> Self {
        Self {
            asset,
            magnitude: Magnitude::Integral(count),
        }
    }

    /// Creates a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] when `value < 0`. This is the only
    /// validation the value type performs.
    pub fn decimal(asset: Asset, value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative {
                asset,
                magnitude: value,
            });
        }
        Ok(Self {
            asset,
            magnitude: Magnitude::Decimal(value),
        })
    }

    /// The asset this amount is of.
    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    /// The magnitude as a normalized decimal, guaranteed non-negative.
    pub fn magnitude(&self) -> Decimal {
        self.magnitude.to_decimal()
    }

    /// The magnitude's shape.
    pub fn shape(&self) -> &Magnitude {
        &self.magnitude
    }

    /// The whole-number accessor: `Some` only for integral-shaped amounts.
    ///
    /// A decimal-shaped amount that happens to hold a whole value is NOT
    /// integral — shape is part of the amount's meaning, and integral-only
    /// points rely on it to refuse decimal amounts.
    pub fn as_integral(&self) -> Option<u64> {
        match self.magnitude {
            Magnitude::Integral(count) => Some(count),
            Magnitude::Decimal(_) => None,
        }
    }

    /// Whether the magnitude is zero.
    pub fn is_zero(&self) -> bool {
        self.magnitude().is_zero()
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.asset == other.asset && self.magnitude() == other.magnitude()
    }
}

impl Eq for Amount {}

impl Hash for Amount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Decimal's Hash is normalization-consistent, so hashing the
        // normalized view keeps Hash in agreement with the cross-shape Eq.
        self.asset.hash(state);
        self.magnitude().hash(state);
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude(), self.asset)
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

    fn gold() -> Asset {
        Asset::currency("gold").unwrap()
    }

    #[test]
    fn integral_amounts_are_never_negative() {
        let amount = Amount::integral(arrows(), 0);
        assert!(amount.magnitude() >= Decimal::ZERO);
        assert!(amount.is_zero());
    }

    #[test]
    fn negative_decimal_rejected() {
        let result = Amount::decimal(gold(), dec!(-0.01));
        assert!(matches!(result, Err(AmountError::Negative { .. })));
    }

    #[test]
    fn zero_decimal_accepted() {
        let amount = Amount::decimal(gold(), Decimal::ZERO).unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn normalized_view_strips_trailing_zeros() {
        let amount = Amount::decimal(gold(), dec!(5.500)).unwrap();
        assert_eq!(amount.magnitude(), dec!(5.5));
    }

    #[test]
    fn integral_decimal_view_is_exact() {
        let amount = Amount::integral(arrows(), 12_345);
        assert_eq!(amount.magnitude(), Decimal::from(12_345u64));
    }

    #[test]
    fn cross_shape_equality() {
        let counted = Amount::integral(gold(), 5);
        let weighed = Amount::decimal(gold(), dec!(5.00)).unwrap();
        assert_eq!(counted, weighed);
    }

    #[test]
    fn equality_requires_same_asset() {
        let a = Amount::integral(arrows(), 5);
        let b = Amount::integral(gold(), 5);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_agrees_with_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Amount::integral(gold(), 5));
        // Equal under the normalized view, so it must not occupy a second slot.
        set.insert(Amount::decimal(gold(), dec!(5.0)).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn as_integral_is_shape_strict() {
        assert_eq!(Amount::integral(arrows(), 7).as_integral(), Some(7));
        let decimal = Amount::decimal(arrows(), dec!(7)).unwrap();
        assert_eq!(decimal.as_integral(), None);
    }

    #[test]
    fn display_shows_magnitude_and_fqn() {
        let amount = Amount::integral(arrows(), 3);
        assert_eq!(amount.to_string(), "3 item:arrow");
    }

    #[test]
    fn serde_round_trip_preserves_shape() {
        let amount = Amount::decimal(gold(), dec!(2.50)).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let recovered: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, recovered);
        assert!(recovered.as_integral().is_none());
    }
}
