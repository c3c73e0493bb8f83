//! # Ledger Errors
//!
//! Every variant is recoverable: a failed operation leaves balances, the
//! blacklist and the recipient registry exactly as they were.

use super::entities::{Address, Timestamp};
use primitive_types::U256;
use thiserror::Error;

/// Errors returned by ledger commands and the recipient resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The authorization deadline is before the current time.
    #[error("Expired signature: deadline {deadline} is before {now}")]
    Expired { deadline: Timestamp, now: Timestamp },

    /// The recovered signer is not the claimed owner, or the signature
    /// components are malformed.
    #[error("Invalid signature for owner 0x{}", hex::encode(.owner))]
    InvalidSignature { owner: Address },

    /// The acting account has already been cut off.
    #[error("Account 0x{} is blacklisted", hex::encode(.account))]
    Blacklisted { account: Address },

    /// The sender cannot cover the amount.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Resolution reached a blacklisted account with no emergency recipient.
    #[error("No emergency recipient registered for blacklisted account 0x{}", hex::encode(.account))]
    NoRoute { account: Address },

    /// Resolution from `origin` exceeded the hop bound, so the recipient
    /// chain loops.
    #[error("Emergency recipient chain from 0x{} loops after {hops} hops", hex::encode(.origin))]
    CyclicRoute { origin: Address, hops: usize },
}

impl LedgerError {
    /// Short stable label, used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Expired { .. } => "expired",
            LedgerError::InvalidSignature { .. } => "invalid_signature",
            LedgerError::Blacklisted { .. } => "blacklisted",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::NoRoute { .. } => "no_route",
            LedgerError::CyclicRoute { .. } => "cyclic_route",
        }
    }
}
