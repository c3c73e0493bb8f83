//! # secp256k1 Signer Recovery
//!
//! `SignerRecovery` backed by the `k256` crate.
//!
//! ## Security Notes
//!
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN n/2
//! - **Constant-Time Comparisons**: scalar checks use `subtle`
//! - Any failure recovers nothing; callers treat that as a signer mismatch

use crate::domain::eip712::keccak256;
use crate::domain::entities::{Address, EcdsaSignature, Hash};
use crate::ports::outbound::SignerRecovery;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recovers signer addresses from recoverable secp256k1 signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl Secp256k1Recovery {
    /// Create a new recovery adapter.
    pub fn new() -> Self {
        Self
    }
}

impl SignerRecovery for Secp256k1Recovery {
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Option<Address> {
        if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
            return None;
        }
        if !is_low_s(&signature.s) {
            return None;
        }
        recover_address(digest, signature)
    }
}

/// Recover the signer's address, without range or malleability checks.
fn recover_address(digest: &Hash, signature: &EcdsaSignature) -> Option<Address> {
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();

    let sig = parsed.ok()?;
    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id).ok()?;
    Some(address_from_pubkey(&recovered_key))
}

/// Derive the 20-byte address of a public key: the last 20 bytes of
/// keccak256 over the uncompressed point without its 0x04 prefix.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Option<RecoveryId> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return None,
    };
    RecoveryId::try_from(id).ok()
}

/// Constant-time `a < b` over big-endian 32-byte integers.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}

/// S strictly below n/2 (EIP-2).
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER).into()
}

/// Scalar in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }
    (!is_zero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// s' = n - s
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================
