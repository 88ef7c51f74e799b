//! # Protocol Constants
//!
//! The grammar and naming conventions every SPECIE deployment shares.
//! Identifier grammars are frozen: relaxing them would silently change
//! which storage keys collide, so treat any edit here as a breaking change.

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Protocol revision advertised to hosts. Follows the crate version until
/// the protocol and crate release cycles diverge.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Identifier Grammars
// ---------------------------------------------------------------------------

/// Separator between an identifier's namespace-like part and its local part,
/// used by asset fully-qualified names and party handles alike.
pub const FQN_SEPARATOR: char = ':';

/// Asset groups start with a lowercase letter, continue with lowercase
/// letters, digits, periods, underscores or hyphens, and end with a
/// lowercase letter, digit or underscore. Two characters minimum.
pub const ASSET_GROUP_PATTERN: &str = "[a-z][a-z0-9._-]*[a-z0-9_]";

/// Asset identifiers are one or more letters, digits, hash signs, colons,
/// slashes, periods, underscores, pluses, equals signs or hyphens.
pub const ASSET_IDENTIFIER_PATTERN: &str = "[a-zA-Z0-9#:/._+=-]+";

/// Party namespaces start with a lowercase letter and, when longer than one
/// character, end with a lowercase letter, digit or underscore.
pub const PARTY_NAMESPACE_PATTERN: &str = "[a-z]([a-zA-Z0-9_-]*[a-z0-9_])?";

/// Party keys are one or more letters, digits, hash signs, slashes,
/// underscores, pluses, equals signs or hyphens. Colons are excluded so a
/// `namespace:key` handle always splits unambiguously.
pub const PARTY_KEY_PATTERN: &str = "[a-zA-Z0-9#/_+=-]+";

// ---------------------------------------------------------------------------
// Well-Known Names
// ---------------------------------------------------------------------------

/// Asset group for discrete, countable things (arrows, ores, tokens).
pub const GROUP_ITEM: &str = "item";

/// Asset group for divisible currencies.
pub const GROUP_CURRENCY: &str = "currency";

/// Party namespace for player identities. Keys are typically the platform's
/// stable player id (a UUID string, an account number).
pub const NAMESPACE_PLAYER: &str = "player";

/// Party namespace for server-side actors: shops, quest rewards, taxes.
pub const NAMESPACE_SYSTEM: &str = "system";

/// Party namespace for shared accounts addressed by account id.
pub const NAMESPACE_ACCOUNT: &str = "account";
