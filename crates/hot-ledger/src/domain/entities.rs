//! # Domain Entities
//!
//! Core data structures shared by the registries, the resolver and the ledger.
//!
//! ## Type Decisions
//!
//! - `U256` amounts: balances and supply follow the 256-bit token convention,
//!   so an 18-decimal supply of one million units fits without scaling.
//! - `Timestamp` is whole seconds; deadlines are compared against a caller
//!   supplied `now`, never the wall clock.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 20-byte account address (last 20 bytes of keccak256(pubkey)).
pub type Address = [u8; 20];

/// 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// The zero address, used as the source of the genesis mint.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Render an address as `0x`-prefixed lowercase hex.
pub fn to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a 20-byte address from hex, with or without the `0x` prefix.
pub fn parse_address(value: &str) -> Option<Address> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).ok()?;
    bytes.try_into().ok()
}

/// Recoverable ECDSA signature on secp256k1.
///
/// Wire layout is 65 bytes: `r (32) || s (32) || v (1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
}

impl EcdsaSignature {
    /// Length of the packed `r || s || v` encoding.
    pub const ENCODED_LEN: usize = 65;

    /// Create a signature from its components.
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }

    /// Decode the packed 65-byte `r || s || v` form.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return None;
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Some(Self { v: bytes[64], r, s })
    }

    /// Encode as packed `r || s || v`.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// A signed request to blacklist `owner` and sweep its balance to its
/// emergency recipient chain.
///
/// Anyone may submit it; the signature alone carries the owner's intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyWithdrawAuthorization {
    /// Account being cut off
    pub owner: Address,
    /// Last second (inclusive) at which the authorization is accepted
    pub deadline: Timestamp,
    /// Owner's signature over the typed-data digest
    pub signature: EcdsaSignature,
}

/// State transitions recorded in the ledger journal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Funds credited to `to` (always the resolved holder).
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
    },
    /// A credit addressed to `nominal` landed on `resolved`.
    Rerouted {
        nominal: Address,
        resolved: Address,
        hops: usize,
    },
    /// `account` declared its emergency recipient.
    EmergencyRecipientSet { account: Address, recipient: Address },
    /// `account` was permanently blacklisted.
    Blacklisted { account: Address },
    /// `owner`'s full balance was swept to `recipient`.
    EmergencyWithdraw {
        owner: Address,
        recipient: Address,
        amount: U256,
    },
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::Transfer { from, to, amount } => {
                write!(f, "Transfer({} -> {}, {})", to_hex(from), to_hex(to), amount)
            }
            LedgerEvent::Rerouted {
                nominal,
                resolved,
                hops,
            } => write!(
                f,
                "Rerouted({} -> {}, {} hops)",
                to_hex(nominal),
                to_hex(resolved),
                hops
            ),
            LedgerEvent::EmergencyRecipientSet { account, recipient } => write!(
                f,
                "EmergencyRecipientSet({} -> {})",
                to_hex(account),
                to_hex(recipient)
            ),
            LedgerEvent::Blacklisted { account } => write!(f, "Blacklisted({})", to_hex(account)),
            LedgerEvent::EmergencyWithdraw {
                owner,
                recipient,
                amount,
            } => write!(
                f,
                "EmergencyWithdraw({} -> {}, {})",
                to_hex(owner),
                to_hex(recipient),
                amount
            ),
        }
    }
}

/// Descriptive token metadata. `name` doubles as the typed-data domain name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Outcome of a committed transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Debited account
    pub from: Address,
    /// Destination named by the caller
    pub nominal: Address,
    /// Account actually credited
    pub recipient: Address,
    /// Amount moved
    pub amount: U256,
    /// Emergency recipient hops walked (0 when not rerouted)
    pub hops: usize,
}

impl TransferReceipt {
    /// Whether the credit landed somewhere other than the nominal destination.
    pub fn rerouted(&self) -> bool {
        self.nominal != self.recipient
    }
}

/// Outcome of a committed emergency withdraw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Account now blacklisted
    pub owner: Address,
    /// Account that received the swept balance
    pub recipient: Address,
    /// Amount swept
    pub amount: U256,
    /// Hops walked from `owner` (at least 1)
    pub hops: usize,
}
