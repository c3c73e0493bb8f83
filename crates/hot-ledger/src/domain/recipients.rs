//! # Emergency Recipient Registry
//!
//! Maps an account to the fallback account that receives credits once the
//! first is blacklisted. Last write wins. The value may be the account
//! itself, a blacklisted account, or an account with no balance; the
//! resolver copes with all three.

use super::blacklist::BlacklistRegistry;
use super::entities::Address;
use super::errors::LedgerError;
use std::collections::HashMap;

/// Declared emergency recipients.
#[derive(Clone, Debug, Default)]
pub struct EmergencyRecipientRegistry {
    recipients: HashMap<Address, Address>,
}

impl EmergencyRecipientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `recipient` as `caller`'s emergency recipient.
    ///
    /// Blacklisted callers may no longer change their routing. Returns the
    /// previous entry, if any.
    pub fn set_recipient(
        &mut self,
        blacklist: &BlacklistRegistry,
        caller: Address,
        recipient: Address,
    ) -> Result<Option<Address>, LedgerError> {
        if blacklist.is_blacklisted(&caller) {
            return Err(LedgerError::Blacklisted { account: caller });
        }
        Ok(self.recipients.insert(caller, recipient))
    }

    /// Declared recipient of `account`.
    pub fn get_recipient(&self, account: &Address) -> Option<Address> {
        self.recipients.get(account).copied()
    }

    /// Number of accounts with a declared recipient.
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Whether no recipient has been declared.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
