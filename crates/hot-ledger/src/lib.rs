//! # Hot Ledger
//!
//! Fungible token ledger with a signed emergency withdraw.
//!
//! An account owner who fears their key is compromised signs a typed-data
//! authorization offline. Anyone may relay it: the owner is then permanently
//! blacklisted and their whole balance moves to their declared emergency
//! recipient. Later transfers addressed to a blacklisted account are
//! rerouted along the same recipient chain.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Ledger aggregate, registries, resolver, typed-data hashing
//! - **Ports Layer** (`ports/`): `HotLedgerApi` inbound, `SignerRecovery` / `TimeSource` outbound
//! - **Adapters** (`adapters/`): secp256k1 recovery and clocks
//! - **Service Layer** (`service.rs`): Lock-guarded service wiring domain to ports
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Replay Scope**: the domain separator binds name, version, chain id and ledger address
//! - **Atomicity**: every command validates fully before mutating

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{address_from_pubkey, FixedTimeSource, Secp256k1Recovery, SystemTimeSource};
pub use config::{ConfigError, LedgerConfig};
pub use domain::{
    keccak256, parse_address, to_hex, Address, EcdsaSignature, EmergencyWithdrawAuthorization,
    Hash, Ledger, LedgerError, LedgerEvent, Resolution, Timestamp, TokenMetadata,
    TransferReceipt, TypedDataDomain, WithdrawalReceipt, ZERO_ADDRESS,
};
pub use ports::inbound::HotLedgerApi;
pub use ports::outbound::{SignerRecovery, TimeSource};
pub use primitive_types::U256;
pub use service::HotLedgerService;
