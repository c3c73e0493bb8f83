//! # Ports
//!
//! Inbound API and outbound capabilities of the ledger.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
