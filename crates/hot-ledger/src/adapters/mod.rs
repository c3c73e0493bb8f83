//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod clock;
pub mod secp256k1;

pub use clock::{FixedTimeSource, SystemTimeSource};
pub use secp256k1::{address_from_pubkey, Secp256k1Recovery};
