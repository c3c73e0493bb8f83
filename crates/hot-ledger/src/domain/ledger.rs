//! # Ledger Aggregate
//!
//! Balances, total supply, both registries and the signature authority,
//! owned as one unit. Every command validates fully before it mutates, so a
//! failing command leaves the aggregate untouched and appends no events.
//!
//! ## Invariants
//!
//! - `sum(balances) == total_supply` after every command
//! - blacklist membership never shrinks
//! - every credit lands on the account the resolver picks for its
//!   destination, never on a blacklisted account

use super::authority::SignatureAuthority;
use super::blacklist::BlacklistRegistry;
use super::eip712::TypedDataDomain;
use super::entities::{
    Address, EmergencyWithdrawAuthorization, Hash, LedgerEvent, Timestamp, TransferReceipt,
    WithdrawalReceipt, ZERO_ADDRESS,
};
use super::errors::LedgerError;
use super::recipients::EmergencyRecipientRegistry;
use super::resolver::{resolve, PendingBlacklist, Registries, Resolution};
use crate::ports::outbound::SignerRecovery;
use primitive_types::U256;
use std::collections::HashMap;

/// Token ledger with emergency withdraw and recipient rerouting.
pub struct Ledger<R> {
    authority: SignatureAuthority<R>,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    blacklist: BlacklistRegistry,
    recipients: EmergencyRecipientRegistry,
    journal: Vec<LedgerEvent>,
}

impl<R: SignerRecovery> Ledger<R> {
    /// Create a ledger minting `total_supply` to `initial_holder`.
    pub fn new(
        total_supply: U256,
        initial_holder: Address,
        domain: TypedDataDomain,
        recovery: R,
    ) -> Self {
        let mut balances = HashMap::new();
        if !total_supply.is_zero() {
            balances.insert(initial_holder, total_supply);
        }

        Self {
            authority: SignatureAuthority::new(domain, recovery),
            total_supply,
            balances,
            blacklist: BlacklistRegistry::new(),
            recipients: EmergencyRecipientRegistry::new(),
            journal: vec![LedgerEvent::Transfer {
                from: ZERO_ADDRESS,
                to: initial_holder,
                amount: total_supply,
            }],
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Balance held by `account`.
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Total supply minted at construction.
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Whether `account` is blacklisted.
    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.blacklist.is_blacklisted(account)
    }

    /// Declared emergency recipient of `account`.
    pub fn get_recipient(&self, account: &Address) -> Option<Address> {
        self.recipients.get_recipient(account)
    }

    /// Number of blacklisted accounts.
    pub fn blacklisted_count(&self) -> usize {
        self.blacklist.len()
    }

    /// The typed-data domain of this ledger.
    pub fn domain(&self) -> &TypedDataDomain {
        self.authority.domain()
    }

    /// Cached domain separator.
    pub fn domain_separator(&self) -> Hash {
        self.authority.domain_separator()
    }

    /// Digest `owner` must sign to authorize an emergency withdraw.
    pub fn emergency_withdraw_digest(&self, owner: &Address, deadline: Timestamp) -> Hash {
        self.authority.emergency_withdraw_digest(owner, deadline)
    }

    /// Account a credit addressed to `destination` would land on.
    pub fn resolve(&self, destination: Address) -> Result<Resolution, LedgerError> {
        resolve(&self.registries(), destination)
    }

    /// Committed events, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.journal
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Move `amount` from `sender` to whatever `destination` resolves to.
    pub fn transfer(
        &mut self,
        sender: Address,
        destination: Address,
        amount: U256,
    ) -> Result<TransferReceipt, LedgerError> {
        if self.blacklist.is_blacklisted(&sender) {
            return Err(LedgerError::Blacklisted { account: sender });
        }

        let available = self.balance_of(&sender);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let resolution = self.resolve(destination)?;

        self.debit(&sender, amount);
        self.credit(sender, destination, resolution, amount);

        Ok(TransferReceipt {
            from: sender,
            nominal: destination,
            recipient: resolution.recipient,
            amount,
            hops: resolution.hops,
        })
    }

    /// Declare `recipient` as `caller`'s emergency recipient.
    pub fn set_recipient(&mut self, caller: Address, recipient: Address) -> Result<(), LedgerError> {
        self.recipients
            .set_recipient(&self.blacklist, caller, recipient)?;
        self.journal.push(LedgerEvent::EmergencyRecipientSet {
            account: caller,
            recipient,
        });
        Ok(())
    }

    /// Blacklist the authorization's owner and sweep its balance down its
    /// emergency recipient chain.
    ///
    /// Checks run in a fixed order: already blacklisted, expiry, signature,
    /// routing. The caller's identity plays no part.
    pub fn emergency_withdraw(
        &mut self,
        authorization: &EmergencyWithdrawAuthorization,
        now: Timestamp,
    ) -> Result<WithdrawalReceipt, LedgerError> {
        let EmergencyWithdrawAuthorization {
            owner,
            deadline,
            signature,
        } = *authorization;

        if self.blacklist.is_blacklisted(&owner) {
            return Err(LedgerError::Blacklisted { account: owner });
        }

        if deadline < now {
            return Err(LedgerError::Expired { deadline, now });
        }

        if !self
            .authority
            .verify_emergency_withdraw(&owner, deadline, &signature)
        {
            return Err(LedgerError::InvalidSignature { owner });
        }

        // Resolve as if `owner` were already blacklisted, so the first hop is
        // always its declared recipient.
        let registries = self.registries();
        let pending = PendingBlacklist {
            base: &registries,
            account: owner,
        };
        let resolution = resolve(&pending, owner)?;

        let amount = self.balance_of(&owner);
        self.blacklist.mark_blacklisted(owner);
        self.journal.push(LedgerEvent::Blacklisted { account: owner });
        self.debit(&owner, amount);
        self.credit(owner, owner, resolution, amount);
        self.journal.push(LedgerEvent::EmergencyWithdraw {
            owner,
            recipient: resolution.recipient,
            amount,
        });

        Ok(WithdrawalReceipt {
            owner,
            recipient: resolution.recipient,
            amount,
            hops: resolution.hops,
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn registries(&self) -> Registries<'_> {
        Registries {
            blacklist: &self.blacklist,
            recipients: &self.recipients,
        }
    }

    /// Caller has checked `amount <= balance`.
    fn debit(&mut self, account: &Address, amount: U256) {
        let remaining = self.balance_of(account) - amount;
        if remaining.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, remaining);
        }
    }

    /// Credit an already-resolved destination. Cannot overflow: the amount
    /// was just debited and balances sum to `total_supply`.
    fn credit(&mut self, from: Address, nominal: Address, resolution: Resolution, amount: U256) {
        if !amount.is_zero() {
            *self.balances.entry(resolution.recipient).or_default() += amount;
        }

        if resolution.recipient != nominal {
            self.journal.push(LedgerEvent::Rerouted {
                nominal,
                resolved: resolution.recipient,
                hops: resolution.hops,
            });
        }
        self.journal.push(LedgerEvent::Transfer {
            from,
            to: resolution.recipient,
            amount,
        });
    }
}
