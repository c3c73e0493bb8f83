//! # Blacklist Registry
//!
//! Set of permanently cut-off accounts. Membership is monotonic: there is
//! no removal operation.

use super::entities::Address;
use std::collections::HashSet;

/// Accounts that have executed an emergency withdraw.
#[derive(Clone, Debug, Default)]
pub struct BlacklistRegistry {
    accounts: HashSet<Address>,
}

impl BlacklistRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `account` is blacklisted.
    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.accounts.contains(account)
    }

    /// Blacklist `account`. Returns `true` if it was newly added; marking an
    /// already-blacklisted account is a no-op.
    pub fn mark_blacklisted(&mut self, account: Address) -> bool {
        self.accounts.insert(account)
    }

    /// Number of blacklisted accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account is blacklisted.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
