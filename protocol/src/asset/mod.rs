//! # Asset Module — What Value Is
//!
//! An [`Asset`] names a kind of value: a currency, an item type, a token.
//! An [`Amount`] is a non-negative quantity of exactly one asset. Everything
//! else in the protocol moves these two value types around.
//!
//! ```text
//! identity.rs — Asset: group + identifier, validated at construction
//! amount.rs   — Amount: integral or decimal magnitude, never negative
//! ```
//!
//! Both types are immutable, cheaply cloneable, and safe to share across
//! threads without synchronization.

pub mod amount;
pub mod identity;

pub use amount::{Amount, AmountError, Magnitude};
pub use identity::{Asset, AssetError};
