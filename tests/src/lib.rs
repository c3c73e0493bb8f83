//! # Hot Ledger Test Suite
//!
//! End-to-end flows driven through `HotLedgerService` with real secp256k1
//! keys, the way a relayer and its users would drive a deployed ledger.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Key-holding actors and a deployed service
//! └── integration/
//!     ├── emergency_flows.rs   # Relayed withdraw, blacklisting, rerouting
//!     └── concurrency.rs       # Racing relayers and transfers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hot-tests
//! cargo test -p hot-tests integration::emergency_flows::
//! ```

pub mod fixtures;
pub mod integration;
