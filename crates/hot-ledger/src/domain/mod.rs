//! # Domain Layer
//!
//! Pure ledger logic with no I/O dependencies.

pub mod authority;
pub mod blacklist;
pub mod eip712;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod recipients;
pub mod resolver;

pub use authority::SignatureAuthority;
pub use blacklist::BlacklistRegistry;
pub use eip712::{
    emergency_withdraw_struct_hash, keccak256, typed_data_digest, TypedDataDomain,
};
pub use entities::*;
pub use errors::LedgerError;
pub use ledger::Ledger;
pub use recipients::EmergencyRecipientRegistry;
pub use resolver::{resolve, Resolution, RouteView};
