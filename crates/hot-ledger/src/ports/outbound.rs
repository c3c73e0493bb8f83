//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the ledger needs but does not implement itself.

use crate::domain::entities::{Address, EcdsaSignature, Hash, Timestamp};

/// Recovers the signer of a prehashed message.
///
/// Injected so authorization logic can be exercised without key material.
/// Any malformed input must yield `None`, never a panic.
pub trait SignerRecovery: Send + Sync {
    /// Recover the address that produced `signature` over `digest`.
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Option<Address>;
}

impl<R: SignerRecovery + ?Sized> SignerRecovery for &R {
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Option<Address> {
        (**self).recover(digest, signature)
    }
}

impl<R: SignerRecovery + ?Sized> SignerRecovery for Box<R> {
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Option<Address> {
        (**self).recover(digest, signature)
    }
}

/// Time source for deadline checks.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in seconds.
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Mock recovery for testing.
///
/// A mock signature carries the signer in the low 20 bytes of `r` and the
/// signed digest in `s`; recovery succeeds only when `s` equals the digest.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRecovery;

#[cfg(test)]
impl MockRecovery {
    /// Produce a mock signature by `signer` over `digest`.
    pub fn sign(signer: &Address, digest: &Hash) -> EcdsaSignature {
        let mut r = [0u8; 32];
        r[12..].copy_from_slice(signer);
        EcdsaSignature::new(27, r, *digest)
    }
}

#[cfg(test)]
impl SignerRecovery for MockRecovery {
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Option<Address> {
        if signature.v != 27 || signature.s != *digest {
            return None;
        }
        let mut signer = [0u8; 20];
        signer.copy_from_slice(&signature.r[12..]);
        Some(signer)
    }
}
