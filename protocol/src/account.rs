//! # Shared Accounts
//!
//! An [`Account`] is a point owned jointly: a guild treasury, a shop till
//! shared by staff, a family vault. Parties are enrolled at an
//! [`AccessLevel`], and every balance operation happens through an
//! [`AccountView`] — one participant's perspective on the account, exposing
//! exactly the capability subset their level grants.
//!
//! A viewer's view is queryable and totallable and nothing more; a member's
//! view can also deposit; co-owners and owners get the full set. The gating
//! shows up twice: the view's [`Point`] accessors hide ungranted
//! capabilities (so executor dispatch fails fast with a capability
//! mismatch), and the capability methods themselves refuse with the
//! operation's own typed error when called directly.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::{Amount, Asset};
use crate::balance::{
    AcceptError, Ledger, Point, Queryable, Receiver, SetError, Settable, Source, SupplyError,
    Total,
};
use crate::party::PartyId;

// ---------------------------------------------------------------------------
// Access Levels
// ---------------------------------------------------------------------------

/// Graded access to a shared account, ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// May query and read totals.
    Viewer,
    /// May additionally deposit.
    Member,
    /// May additionally withdraw, set balances, and manage participants
    /// below their own level.
    CoOwner,
    /// Full control. Every account has at least one owner at all times.
    Owner,
}

impl AccessLevel {
    /// Parses a level from its display name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "member" => Some(Self::Member),
            "co-owner" => Some(Self::CoOwner),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessLevel::Viewer => "viewer",
            AccessLevel::Member => "member",
            AccessLevel::CoOwner => "co-owner",
            AccessLevel::Owner => "owner",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by account management operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AccountError {
    /// The account id is empty or contains whitespace.
    #[error("invalid account id {id:?}: must be non-empty with no whitespace")]
    InvalidId {
        /// The rejected id.
        id: String,
    },

    /// The acting party lacks the privilege for the attempted operation.
    #[error("access denied for {party}: {reason}")]
    AccessDenied {
        /// The party that was refused.
        party: PartyId,
        /// Human-readable refusal reason.
        reason: String,
    },

    /// The party is already enrolled.
    #[error("{party} is already a participant of this account")]
    DuplicateParticipant {
        /// The party that was already enrolled.
        party: PartyId,
    },

    /// The party is not enrolled.
    #[error("{party} is not a participant of this account")]
    NotAParticipant {
        /// The party that was not found.
        party: PartyId,
    },

    /// The operation would leave the account without any owner.
    #[error("{party} is the last owner and cannot be removed or demoted")]
    LastOwner {
        /// The sole remaining owner.
        party: PartyId,
    },
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A jointly-held point of account.
///
/// The backing funds are a [`Ledger`]; participants reach them through
/// level-gated [`AccountView`]s obtained from [`Account::view`]. Membership
/// mutations take the account's membership lock; balance operations take
/// the ledger's own lock. The two never nest.
#[derive(Debug)]
pub struct Account {
    id: String,
    funds: Ledger,
    members: Mutex<HashMap<PartyId, AccessLevel>>,
}

impl Account {
    /// Creates an account with `owner` enrolled at [`AccessLevel::Owner`].
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidId`] for an empty or whitespace-
    /// containing id.
    pub fn new(id: &str, owner: PartyId) -> Result<Self, AccountError> {
        if id.is_empty() || id.contains(char::is_whitespace) {
            return Err(AccountError::InvalidId { id: id.to_string() });
        }
        let mut members = HashMap::new();
        members.insert(owner, AccessLevel::Owner);
        Ok(Self {
            id: id.to_string(),
            funds: Ledger::new(),
            members: Mutex::new(members),
        })
    }

    /// The account's host-unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Enrolls a party at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateParticipant`] when already enrolled.
    pub fn add(&self, party: PartyId, level: AccessLevel) -> Result<AccessLevel, AccountError> {
        let mut members = self.members.lock();
        if members.contains_key(&party) {
            return Err(AccountError::DuplicateParticipant { party });
        }
        members.insert(party, level);
        Ok(level)
    }

    /// Enrolls a party at the default [`AccessLevel::Member`] level.
    pub fn add_member(&self, party: PartyId) -> Result<AccessLevel, AccountError> {
        self.add(party, AccessLevel::Member)
    }

    /// Removes a party. Returns `false` when the party was not enrolled.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::LastOwner`] when removing the sole owner.
    pub fn remove(&self, party: &PartyId) -> Result<bool, AccountError> {
        let mut members = self.members.lock();
        let level = match members.get(party) {
            None => return Ok(false),
            Some(&level) => level,
        };
        if level == AccessLevel::Owner && count_owners(&members) == 1 {
            return Err(AccountError::LastOwner {
                party: party.clone(),
            });
        }
        members.remove(party);
        Ok(true)
    }

    /// The party's current level, or `None` when not enrolled.
    pub fn access_level(&self, party: &PartyId) -> Option<AccessLevel> {
        self.members.lock().get(party).copied()
    }

    /// Changes a party's level, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotAParticipant`] when the party is not
    /// enrolled, and [`AccountError::LastOwner`] when demoting the sole
    /// owner.
    pub fn set_access_level(
        &self,
        party: &PartyId,
        level: AccessLevel,
    ) -> Result<AccessLevel, AccountError> {
        let mut members = self.members.lock();
        let current = *members
            .get(party)
            .ok_or_else(|| AccountError::NotAParticipant {
                party: party.clone(),
            })?;
        if current == AccessLevel::Owner && level < AccessLevel::Owner && count_owners(&members) == 1
        {
            return Err(AccountError::LastOwner {
                party: party.clone(),
            });
        }
        members.insert(party.clone(), level);
        Ok(current)
    }

    /// All participants with their levels, in no particular order.
    pub fn participants(&self) -> Vec<(PartyId, AccessLevel)> {
        self.members
            .lock()
            .iter()
            .map(|(party, &level)| (party.clone(), level))
            .collect()
    }

    /// The account as seen by `party`.
    ///
    /// The view snapshots the party's level at creation; re-obtain a view
    /// after membership changes.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::AccessDenied`] for non-participants.
    pub fn view(&self, party: &PartyId) -> Result<AccountView<'_>, AccountError> {
        let level = self
            .access_level(party)
            .ok_or_else(|| AccountError::AccessDenied {
                party: party.clone(),
                reason: "not a participant of this account".to_string(),
            })?;
        Ok(AccountView {
            account: self,
            party: party.clone(),
            level,
        })
    }
}

fn count_owners(members: &HashMap<PartyId, AccessLevel>) -> usize {
    members
        .values()
        .filter(|&&level| level == AccessLevel::Owner)
        .count()
}

// ---------------------------------------------------------------------------
// AccountView
// ---------------------------------------------------------------------------

/// One participant's perspective on an [`Account`].
///
/// Implements the balance capabilities gated by the participant's level and
/// declares exactly the granted subset through [`Point`], so a transaction
/// executor refuses ungranted operations before touching the account.
#[derive(Debug)]
pub struct AccountView<'a> {
    account: &'a Account,
    party: PartyId,
    level: AccessLevel,
}

impl AccountView<'_> {
    /// The participant this view belongs to.
    pub fn party(&self) -> &PartyId {
        &self.party
    }

    /// The level the view was created at.
    pub fn level(&self) -> AccessLevel {
        self.level
    }

    /// Whether this view carries ownership privileges.
    pub fn is_owner(&self) -> bool {
        self.level >= AccessLevel::CoOwner
    }

    /// Enrolls another party at `level`, which must be strictly below this
    /// view's own level.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::AccessDenied`] when this view carries no
    /// ownership privileges or the requested level is not below its own;
    /// otherwise whatever [`Account::add`] returns.
    pub fn grant(&self, party: PartyId, level: AccessLevel) -> Result<AccessLevel, AccountError> {
        self.require_management_of(level)?;
        self.account.add(party, level)
    }

    /// Removes a party whose level is strictly below this view's own.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::AccessDenied`] on insufficient privilege;
    /// otherwise whatever [`Account::remove`] returns.
    pub fn revoke(&self, party: &PartyId) -> Result<bool, AccountError> {
        let target = self
            .account
            .access_level(party)
            .ok_or_else(|| AccountError::NotAParticipant {
                party: party.clone(),
            })?;
        self.require_management_of(target)?;
        self.account.remove(party)
    }

    fn require_management_of(&self, level: AccessLevel) -> Result<(), AccountError> {
        if !self.is_owner() {
            return Err(AccountError::AccessDenied {
                party: self.party.clone(),
                reason: "participant management requires co-owner access".to_string(),
            });
        }
        if level >= self.level {
            return Err(AccountError::AccessDenied {
                party: self.party.clone(),
                reason: format!("cannot manage participants at or above own level ({})", self.level),
            });
        }
        Ok(())
    }

    fn granted(&self, needed: AccessLevel) -> bool {
        self.level >= needed
    }
}

impl Queryable for AccountView<'_> {
    fn has(&self, amount: &Amount) -> bool {
        self.account.funds.has(amount)
    }
}

impl Total for AccountView<'_> {
    fn total(&self, asset: &Asset) -> Option<Amount> {
        self.account.funds.total(asset)
    }
}

impl Receiver for AccountView<'_> {
    fn give(&self, amount: &Amount) -> Result<(), AcceptError> {
        if !self.granted(AccessLevel::Member) {
            return Err(AcceptError::new(
                amount,
                format!("{} access cannot deposit", self.level),
            ));
        }
        self.account.funds.give(amount)
    }
}

impl Settable for AccountView<'_> {
    fn set(&self, amount: &Amount) -> Result<(), SetError> {
        if !self.granted(AccessLevel::CoOwner) {
            return Err(SetError::new(
                amount,
                format!("{} access cannot set balances", self.level),
            ));
        }
        self.account.funds.set(amount)
    }
}

impl Source for AccountView<'_> {
    fn take(&self, amount: &Amount) -> Result<(), SupplyError> {
        if !self.granted(AccessLevel::CoOwner) {
            return Err(SupplyError::Unsupported {
                amount: amount.clone(),
                reason: format!("{} access cannot withdraw", self.level),
            });
        }
        self.account.funds.take(amount)
    }
}

impl Point for AccountView<'_> {
    fn as_queryable(&self) -> Option<&dyn Queryable> {
        Some(self)
    }

    fn as_total(&self) -> Option<&dyn Total> {
        Some(self)
    }

    fn as_receiver(&self) -> Option<&dyn Receiver> {
        if self.granted(AccessLevel::Member) {
            Some(self)
        } else {
            None
        }
    }

    fn as_settable(&self) -> Option<&dyn Settable> {
        if self.granted(AccessLevel::CoOwner) {
            Some(self)
        } else {
            None
        }
    }

    fn as_source(&self) -> Option<&dyn Source> {
        if self.granted(AccessLevel::CoOwner) {
            Some(self)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
