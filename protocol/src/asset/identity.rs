//! # Asset Identity
//!
//! An [`Asset`] is an opaque, stable identifier for a kind of value. It has
//! no magnitude and no behavior of its own — points use it as a comparable
//! key, and the host's registry decides which assets exist.
//!
//! Identity is two-part: a *group* classifying the asset's broad kind
//! (`item`, `currency`) and an *identifier* unique within that group. The
//! fully-qualified name `group:identifier` is what reference points key
//! their storage on.
//!
//! Both parts are validated at construction against the grammars in
//! [`config`](crate::config); an `Asset` that exists is always well-formed.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{FQN_SEPARATOR, GROUP_CURRENCY, GROUP_ITEM};

use super::amount::{Amount, AmountError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing or parsing an [`Asset`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AssetError {
    /// The group part violates the asset group grammar.
    #[error("invalid asset group {group:?}: want a lowercase start, a [a-z0-9._-] body and a [a-z0-9_] end, two characters minimum")]
    InvalidGroup {
        /// The rejected group string.
        group: String,
    },

    /// The identifier part violates the asset identifier grammar.
    #[error("invalid asset identifier {identifier:?}: want one or more of [a-zA-Z0-9#:/._+=-]")]
    InvalidIdentifier {
        /// The rejected identifier string.
        identifier: String,
    },

    /// A fully-qualified name could not be split into group and identifier.
    #[error("malformed asset name {fqn:?}: expected `group:identifier`")]
    MalformedName {
        /// The string that failed to parse.
        fqn: String,
    },
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A kind of value that may be held, given, taken or totalled at a point.
///
/// Equality, ordering and hashing are by `(group, identifier)`. The host's
/// registry is responsible for not minting two distinct assets under the
/// same name; the protocol treats equal names as the same asset.
///
/// # Examples
///
/// ```
/// use specie_protocol::asset::Asset;
///
/// let arrows = Asset::item("arrow").unwrap();
/// assert_eq!(arrows.fqn(), "item:arrow");
///
/// let gold = Asset::currency("gold").unwrap();
/// assert_ne!(arrows, gold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Asset {
    group: String,
    identifier: String,
}

impl Asset {
    /// Creates an asset from a group and an identifier, validating both.
    pub fn new(group: &str, identifier: &str) -> Result<Self, AssetError> {
        if !valid_group(group) {
            return Err(AssetError::InvalidGroup {
                group: group.to_string(),
            });
        }
        if !valid_identifier(identifier) {
            return Err(AssetError::InvalidIdentifier {
                identifier: identifier.to_string(),
            });
        }
        Ok(Self {
            group: group.to_string(),
            identifier: identifier.to_string(),
        })
    }

    /// Creates an asset in the well-known `item` group.
    pub fn item(identifier: &str) -> Result<Self, AssetError> {
        Self::new(GROUP_ITEM, identifier)
    }

    /// Creates an asset in the well-known `currency` group.
    pub fn currency(identifier: &str) -> Result<Self, AssetError> {
        Self::new(GROUP_CURRENCY, identifier)
    }

    /// The asset's broad kind (`item`, `currency`, ...).
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The group-unique name of the asset.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The fully-qualified `group:identifier` name. This is the storage key
    /// reference points index on.
    pub fn fqn(&self) -> String {
        format!("{}{}{}", self.group, FQN_SEPARATOR, self.identifier)
    }

    /// Convenience constructor for an integral amount of this asset.
    pub fn count(&self, count: u64) -> Amount {
        Amount::integral(self.clone(), count)
    }

    /// Convenience constructor for a decimal amount of this asset.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] when `value` is below zero.
    pub fn worth(&self, value: Decimal) -> Result<Amount, AmountError> {
        Amount::decimal(self.clone(), value)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.group, FQN_SEPARATOR, self.identifier)
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    /// Parses a fully-qualified `group:identifier` name.
    ///
    /// The group grammar excludes `:`, so splitting on the first separator
    /// is unambiguous even though identifiers may themselves contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, identifier) =
            s.split_once(FQN_SEPARATOR)
                .ok_or_else(|| AssetError::MalformedName {
                    fqn: s.to_string(),
                })?;
        Self::new(group, identifier)
    }
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// `[a-z][a-z0-9._-]*[a-z0-9_]` — see [`ASSET_GROUP_PATTERN`](crate::config::ASSET_GROUP_PATTERN).
fn valid_group(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    let last = bytes[bytes.len() - 1];
    if !(last.is_ascii_lowercase() || last.is_ascii_digit() || last == b'_') {
        return false;
    }
    bytes[1..bytes.len() - 1]
        .iter()
        .all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'.' | b'_' | b'-'))
}

/// `[a-zA-Z0-9#:/._+=-]+` — see [`ASSET_IDENTIFIER_PATTERN`](crate::config::ASSET_IDENTIFIER_PATTERN).
fn valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'#' | b':' | b'/' | b'.' | b'_' | b'+' | b'=' | b'-'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_assets_construct() {
        assert!(Asset::new("item", "arrow").is_ok());
        assert!(Asset::new("currency", "gold").is_ok());
        assert!(Asset::new("quest.reward", "key/vault_7").is_ok());
        assert!(Asset::new("my-group_2", "A#B:c=d+e").is_ok());
    }

    #[test]
    fn bad_groups_rejected() {
        for group in ["", "x", "Item", "9lead", "end-", "spa ce", "dot."] {
            let result = Asset::new(group, "arrow");
            assert!(
                matches!(result, Err(AssetError::InvalidGroup { .. })),
                "group {group:?} should be rejected"
            );
        }
    }

    #[test]
    fn bad_identifiers_rejected() {
        for identifier in ["", "sp ace", "semi;colon", "pipe|"] {
            let result = Asset::new("item", identifier);
            assert!(
                matches!(result, Err(AssetError::InvalidIdentifier { .. })),
                "identifier {identifier:?} should be rejected"
            );
        }
    }

    #[test]
    fn fqn_round_trips_through_from_str() {
        let asset = Asset::new("item", "arrow").unwrap();
        let parsed: Asset = asset.fqn().parse().unwrap();
        assert_eq!(asset, parsed);
    }

    #[test]
    fn identifier_colons_survive_parsing() {
        let asset = Asset::new("item", "chest:large/oak").unwrap();
        let parsed: Asset = asset.fqn().parse().unwrap();
        assert_eq!(parsed.group(), "item");
        assert_eq!(parsed.identifier(), "chest:large/oak");
    }

    #[test]
    fn malformed_name_rejected() {
        let result = "no-separator-here".parse::<Asset>();
        assert!(matches!(result, Err(AssetError::MalformedName { .. })));
    }

    #[test]
    fn equality_is_by_both_parts() {
        let a = Asset::item("arrow").unwrap();
        let b = Asset::item("arrow").unwrap();
        let c = Asset::currency("arrow").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serde_round_trip() {
        let asset = Asset::currency("gold").unwrap();
        let json = serde_json::to_string(&asset).unwrap();
        let recovered: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, recovered);
    }
}
