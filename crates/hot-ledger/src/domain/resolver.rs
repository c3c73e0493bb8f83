//! # Recipient Resolver
//!
//! Follows emergency recipients away from blacklisted destinations until a
//! non-blacklisted account is found.
//!
//! ## Termination
//!
//! The walk is bounded by the number of declared recipients `n`. An acyclic
//! chain consumes one distinct entry per hop, so after `n` hops a candidate
//! that is still blacklisted and still has an entry must be revisiting an
//! address: that is reported as `CyclicRoute`. A blacklisted candidate with
//! no entry is always `NoRoute`, whatever the hop count.

use super::blacklist::BlacklistRegistry;
use super::entities::Address;
use super::errors::LedgerError;
use super::recipients::EmergencyRecipientRegistry;

/// Read-only view of the registries consulted during resolution.
pub trait RouteView {
    /// Whether `account` is cut off.
    fn is_blacklisted(&self, account: &Address) -> bool;

    /// Declared emergency recipient of `account`.
    fn recipient_of(&self, account: &Address) -> Option<Address>;

    /// Upper bound on hops for an acyclic chain.
    fn max_hops(&self) -> usize;
}

/// The registries as currently committed.
pub struct Registries<'a> {
    pub blacklist: &'a BlacklistRegistry,
    pub recipients: &'a EmergencyRecipientRegistry,
}

impl RouteView for Registries<'_> {
    fn is_blacklisted(&self, account: &Address) -> bool {
        self.blacklist.is_blacklisted(account)
    }

    fn recipient_of(&self, account: &Address) -> Option<Address> {
        self.recipients.get_recipient(account)
    }

    fn max_hops(&self) -> usize {
        self.recipients.len()
    }
}

/// A view that additionally treats one account as blacklisted.
///
/// Lets an emergency withdraw resolve against the state it is about to
/// commit without mutating anything first.
pub struct PendingBlacklist<'a, V> {
    pub base: &'a V,
    pub account: Address,
}

impl<V: RouteView> RouteView for PendingBlacklist<'_, V> {
    fn is_blacklisted(&self, account: &Address) -> bool {
        *account == self.account || self.base.is_blacklisted(account)
    }

    fn recipient_of(&self, account: &Address) -> Option<Address> {
        self.base.recipient_of(account)
    }

    fn max_hops(&self) -> usize {
        self.base.max_hops()
    }
}

/// Result of a successful resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// First non-blacklisted account on the chain
    pub recipient: Address,
    /// Hops walked (0 when `destination` itself is not blacklisted)
    pub hops: usize,
}

/// Resolve `destination` to the account that should actually be credited.
pub fn resolve<V: RouteView + ?Sized>(
    view: &V,
    destination: Address,
) -> Result<Resolution, LedgerError> {
    let bound = view.max_hops();
    let mut current = destination;
    let mut hops = 0usize;

    while view.is_blacklisted(&current) {
        let next = view
            .recipient_of(&current)
            .ok_or(LedgerError::NoRoute { account: current })?;

        if hops >= bound {
            return Err(LedgerError::CyclicRoute {
                origin: destination,
                hops,
            });
        }

        tracing::debug!(
            from = %super::entities::to_hex(&current),
            to = %super::entities::to_hex(&next),
            hop = hops + 1,
            "Following emergency recipient"
        );

        current = next;
        hops += 1;
    }

    Ok(Resolution {
        recipient: current,
        hops,
    })
}
