//! Configuration for the hot ledger.

use crate::domain::{parse_address, Address, TokenMetadata, TypedDataDomain, ZERO_ADDRESS};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default verifying contract address (first local deployment address).
const DEFAULT_LEDGER_ADDRESS: Address = [
    0x5f, 0xbd, 0xb2, 0x31, 0x56, 0x78, 0xaf, 0xec, 0xb3, 0x67, 0xf0, 0x32, 0xd9, 0x3f, 0x64, 0x2f,
    0x64, 0x18, 0x0a, 0xa3,
];

/// Default initial holder (first local development account).
const DEFAULT_INITIAL_HOLDER: Address = [
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79, 0xcf,
    0xff, 0xb9, 0x22, 0x66,
];

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// A field holds a value the ledger cannot be built with
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Ledger construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Token name, also the typed-data domain name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Display decimals
    pub decimals: u8,
    /// Typed-data domain version
    pub version: String,
    /// Chain id bound into the domain separator
    pub chain_id: u64,
    /// Verifying contract address bound into the domain separator
    pub ledger_address: Address,
    /// Supply minted to `initial_holder` at construction
    pub total_supply: U256,
    /// Receives the whole supply at construction
    pub initial_holder: Address,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "HotERC20".to_string(),
            symbol: "HOT".to_string(),
            decimals: 18,
            version: "1".to_string(),
            chain_id: 31337,
            ledger_address: DEFAULT_LEDGER_ADDRESS,
            total_supply: U256::from(1_000_000u64) * U256::exp10(18),
            initial_holder: DEFAULT_INITIAL_HOLDER,
        }
    }
}

impl LedgerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HOT_TOKEN_NAME`: Token and domain name (default: HotERC20)
    /// - `HOT_TOKEN_SYMBOL`: Token symbol (default: HOT)
    /// - `HOT_TOKEN_DECIMALS`: Decimals (default: 18)
    /// - `HOT_TOKEN_VERSION`: Domain version (default: 1)
    /// - `HOT_CHAIN_ID`: Chain id (default: 31337)
    /// - `HOT_LEDGER_ADDRESS`: Verifying contract, hex
    /// - `HOT_TOTAL_SUPPLY`: Supply in base units, decimal
    /// - `HOT_INITIAL_HOLDER`: Initial holder, hex
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for missing keys. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("HOT_TOKEN_NAME") {
            config.name = name;
        }
        if let Some(symbol) = lookup("HOT_TOKEN_SYMBOL") {
            config.symbol = symbol;
        }
        if let Some(value) = lookup("HOT_TOKEN_DECIMALS") {
            config.decimals = value
                .trim()
                .parse()
                .map_err(|_| invalid("HOT_TOKEN_DECIMALS", value))?;
        }
        if let Some(version) = lookup("HOT_TOKEN_VERSION") {
            config.version = version;
        }
        if let Some(value) = lookup("HOT_CHAIN_ID") {
            config.chain_id = value
                .trim()
                .parse()
                .map_err(|_| invalid("HOT_CHAIN_ID", value))?;
        }
        if let Some(value) = lookup("HOT_LEDGER_ADDRESS") {
            config.ledger_address =
                parse_address(&value).ok_or_else(|| invalid("HOT_LEDGER_ADDRESS", value))?;
        }
        if let Some(value) = lookup("HOT_TOTAL_SUPPLY") {
            config.total_supply = U256::from_dec_str(value.trim())
                .map_err(|_| invalid("HOT_TOTAL_SUPPLY", value))?;
        }
        if let Some(value) = lookup("HOT_INITIAL_HOLDER") {
            config.initial_holder =
                parse_address(&value).ok_or_else(|| invalid("HOT_INITIAL_HOLDER", value))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the ledger cannot be built with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("token name must not be empty"));
        }
        if self.version.is_empty() {
            return Err(ConfigError::Invalid("domain version must not be empty"));
        }
        if self.initial_holder == ZERO_ADDRESS {
            return Err(ConfigError::Invalid("initial holder must not be the zero address"));
        }
        Ok(())
    }

    /// Typed-data domain described by this configuration.
    pub fn domain(&self) -> TypedDataDomain {
        TypedDataDomain::new(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.ledger_address,
        )
    }

    /// Token metadata described by this configuration.
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        }
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}
