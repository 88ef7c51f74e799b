//! # Party Identity
//!
//! A [`PartyId`] names a transaction participant: the player whose wallet
//! is debited, the shop that received payment, the shared account in the
//! middle. The protocol needs nothing from participants beyond a stable,
//! comparable identity — lookups, persistence and display names are the
//! host's business.
//!
//! Identity is `namespace:key`. The namespace classifies the kind of actor
//! (`player`, `system`, `account`); the key is unique within it. Key
//! grammar excludes the separator, so handles round-trip through strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{FQN_SEPARATOR, NAMESPACE_ACCOUNT, NAMESPACE_PLAYER, NAMESPACE_SYSTEM};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing or parsing a [`PartyId`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PartyError {
    /// The namespace violates the party namespace grammar.
    #[error("invalid party namespace {namespace:?}: want a lowercase start and, past one character, a [a-z0-9_] end")]
    InvalidNamespace {
        /// The rejected namespace string.
        namespace: String,
    },

    /// The key violates the party key grammar.
    #[error("invalid party key {key:?}: want one or more of [a-zA-Z0-9#/_+=-]")]
    InvalidKey {
        /// The rejected key string.
        key: String,
    },

    /// A handle could not be split into namespace and key.
    #[error("malformed party handle {handle:?}: expected `namespace:key`")]
    MalformedHandle {
        /// The string that failed to parse.
        handle: String,
    },
}

// ---------------------------------------------------------------------------
// PartyId
// ---------------------------------------------------------------------------

/// Stable identity of a transaction participant.
///
/// # Examples
///
/// ```
/// use specie_protocol::party::PartyId;
///
/// let alice = PartyId::player("d5078156-4d71-4b5e-b1a4-5b2d2f4e6c13").unwrap();
/// assert_eq!(alice.namespace(), "player");
///
/// let shop = PartyId::system("blacksmith").unwrap();
/// assert_eq!(shop.handle(), "system:blacksmith");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyId {
    namespace: String,
    key: String,
}

impl PartyId {
    /// Creates a party identity from a namespace and a key, validating both.
    pub fn new(namespace: &str, key: &str) -> Result<Self, PartyError> {
        if !valid_namespace(namespace) {
            return Err(PartyError::InvalidNamespace {
                namespace: namespace.to_string(),
            });
        }
        if !valid_key(key) {
            return Err(PartyError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
        })
    }

    /// A player identity in the well-known `player` namespace.
    pub fn player(key: &str) -> Result<Self, PartyError> {
        Self::new(NAMESPACE_PLAYER, key)
    }

    /// A server-side actor in the well-known `system` namespace.
    pub fn system(key: &str) -> Result<Self, PartyError> {
        Self::new(NAMESPACE_SYSTEM, key)
    }

    /// A shared account in the well-known `account` namespace.
    pub fn account(key: &str) -> Result<Self, PartyError> {
        Self::new(NAMESPACE_ACCOUNT, key)
    }

    /// The kind of actor this identity names.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The namespace-unique key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// A human-presentable name. Defaults to the key; hosts wanting display
    /// names keep them on their own entity objects.
    pub fn friendly_name(&self) -> &str {
        &self.key
    }

    /// The `namespace:key` handle.
    pub fn handle(&self) -> String {
        format!("{}{}{}", self.namespace, FQN_SEPARATOR, self.key)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, FQN_SEPARATOR, self.key)
    }
}

impl FromStr for PartyId {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, key) =
            s.split_once(FQN_SEPARATOR)
                .ok_or_else(|| PartyError::MalformedHandle {
                    handle: s.to_string(),
                })?;
        Self::new(namespace, key)
    }
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// `[a-z]([a-zA-Z0-9_-]*[a-z0-9_])?` — see [`PARTY_NAMESPACE_PATTERN`](crate::config::PARTY_NAMESPACE_PATTERN).
fn valid_namespace(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes {
        [] => false,
        [only] => only.is_ascii_lowercase(),
        [first, middle @ .., last] => {
            first.is_ascii_lowercase()
                && (last.is_ascii_lowercase() || last.is_ascii_digit() || *last == b'_')
                && middle
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-'))
        }
    }
}

/// `[a-zA-Z0-9#/_+=-]+` — see [`PARTY_KEY_PATTERN`](crate::config::PARTY_KEY_PATTERN).
fn valid_key(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'#' | b'/' | b'_' | b'+' | b'=' | b'-'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
