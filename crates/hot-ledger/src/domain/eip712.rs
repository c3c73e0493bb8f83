//! # Typed-Data Hashing
//!
//! Keccak-256 digests for the `EmergencyWithdraw` authorization, laid out as
//! EIP-712 structured data:
//!
//! ```text
//! domain_separator = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256(version)
//!                              ‖ word(chain_id) ‖ word(verifying_contract))
//! struct_hash      = keccak256(EMERGENCY_WITHDRAW_TYPEHASH ‖ word(owner) ‖ word(deadline))
//! digest           = keccak256(0x19 ‖ 0x01 ‖ domain_separator ‖ struct_hash)
//! ```
//!
//! Every `word` is 32 bytes: integers big-endian, addresses left-padded.

use super::entities::{Address, Hash, Timestamp};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Type string for the domain struct.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Type string for the emergency withdraw struct.
pub const EMERGENCY_WITHDRAW_TYPE: &str = "EmergencyWithdraw(address owner,uint256 deadline)";

/// Prefix bytes of every typed-data digest.
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// The four values bound into the domain separator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataDomain {
    /// Protocol name
    pub name: String,
    /// Version string
    pub version: String,
    /// Network identifier
    pub chain_id: u64,
    /// Identity of the ledger instance
    pub verifying_contract: Address,
}

impl TypedDataDomain {
    /// Create a domain description.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// Compute the domain separator. Deterministic in the four fields.
    pub fn separator(&self) -> Hash {
        let mut encoded = Vec::with_capacity(5 * 32);
        encoded.extend_from_slice(&keccak256(EIP712_DOMAIN_TYPE.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.name.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.version.as_bytes()));
        encoded.extend_from_slice(&u64_word(self.chain_id));
        encoded.extend_from_slice(&address_word(&self.verifying_contract));
        keccak256(&encoded)
    }
}

/// Struct hash of `EmergencyWithdraw(owner, deadline)`.
pub fn emergency_withdraw_struct_hash(owner: &Address, deadline: Timestamp) -> Hash {
    let mut encoded = Vec::with_capacity(3 * 32);
    encoded.extend_from_slice(&keccak256(EMERGENCY_WITHDRAW_TYPE.as_bytes()));
    encoded.extend_from_slice(&address_word(owner));
    encoded.extend_from_slice(&u64_word(deadline));
    keccak256(&encoded)
}

/// Final digest the owner signs: prefix, domain separator, struct hash.
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    let mut encoded = Vec::with_capacity(2 + 2 * 32);
    encoded.extend_from_slice(&TYPED_DATA_PREFIX);
    encoded.extend_from_slice(domain_separator);
    encoded.extend_from_slice(struct_hash);
    keccak256(&encoded)
}
