//! # Signature Authority
//!
//! Builds the typed-data digest for an `EmergencyWithdraw` authorization and
//! checks that it was signed by the claimed owner.
//!
//! The domain separator is computed once at construction and cached.
//! Deadline expiry is the caller's concern and is checked before this.

use super::eip712::{emergency_withdraw_struct_hash, typed_data_digest, TypedDataDomain};
use super::entities::{Address, EcdsaSignature, Hash, Timestamp};
use crate::ports::outbound::SignerRecovery;

/// Verifies emergency withdraw signatures for one ledger domain.
pub struct SignatureAuthority<R> {
    domain: TypedDataDomain,
    separator: Hash,
    recovery: R,
}

impl<R: SignerRecovery> SignatureAuthority<R> {
    /// Create an authority for `domain`, caching its separator.
    pub fn new(domain: TypedDataDomain, recovery: R) -> Self {
        let separator = domain.separator();
        Self {
            domain,
            separator,
            recovery,
        }
    }

    /// The domain this authority signs for.
    pub fn domain(&self) -> &TypedDataDomain {
        &self.domain
    }

    /// Cached domain separator.
    pub fn domain_separator(&self) -> Hash {
        self.separator
    }

    /// Digest an owner must sign to authorize an emergency withdraw.
    pub fn emergency_withdraw_digest(&self, owner: &Address, deadline: Timestamp) -> Hash {
        typed_data_digest(
            &self.separator,
            &emergency_withdraw_struct_hash(owner, deadline),
        )
    }

    /// True iff the signature over `(owner, deadline)` recovers to `owner`.
    ///
    /// Recovery failures count as a mismatch.
    pub fn verify_emergency_withdraw(
        &self,
        owner: &Address,
        deadline: Timestamp,
        signature: &EcdsaSignature,
    ) -> bool {
        let digest = self.emergency_withdraw_digest(owner, deadline);
        match self.recovery.recover(&digest, signature) {
            Some(recovered) => recovered == *owner,
            None => false,
        }
    }
}
