//! # Inbound Port - HotLedgerApi
//!
//! Primary driving port exposing the ledger's commands and queries.
//!
//! ## Caller Identity
//!
//! | Method | Acting account |
//! |--------|----------------|
//! | `transfer` | `sender` (the authenticated caller) |
//! | `set_recipient` | `caller` |
//! | `emergency_withdraw` | the authorization's `owner`; the submitter is irrelevant |

use crate::domain::{
    Address, EmergencyWithdrawAuthorization, Hash, LedgerError, LedgerEvent, Resolution,
    Timestamp, TokenMetadata, TransferReceipt, WithdrawalReceipt,
};
use primitive_types::U256;

/// Primary API for the hot ledger.
///
/// All methods take `&self`; implementations serialize commands internally.
///
/// # Example
///
/// ```rust,ignore
/// use hot_ledger::ports::HotLedgerApi;
///
/// fn relay(ledger: &impl HotLedgerApi, auth: EmergencyWithdrawAuthorization) {
///     let receipt = ledger.emergency_withdraw(&auth)?;
///     assert!(ledger.is_blacklisted(&auth.owner));
/// }
/// ```
pub trait HotLedgerApi: Send + Sync {
    /// Token name, symbol and decimals.
    fn metadata(&self) -> TokenMetadata;

    /// Balance held by `account` (zero if never credited).
    fn balance_of(&self, account: &Address) -> U256;

    /// Fixed total supply.
    fn total_supply(&self) -> U256;

    /// Whether `account` has executed an emergency withdraw.
    fn is_blacklisted(&self, account: &Address) -> bool;

    /// Declared emergency recipient of `account`.
    fn get_recipient(&self, account: &Address) -> Option<Address>;

    /// Where a credit addressed to `destination` would land right now.
    ///
    /// # Errors
    /// - `NoRoute`: the chain dead-ends at a blacklisted account
    /// - `CyclicRoute`: the chain loops among blacklisted accounts
    fn resolve_recipient(&self, destination: &Address) -> Result<Resolution, LedgerError>;

    /// Cached typed-data domain separator.
    fn domain_separator(&self) -> Hash;

    /// Digest `owner` must sign to authorize an emergency withdraw.
    fn emergency_withdraw_digest(&self, owner: &Address, deadline: Timestamp) -> Hash;

    /// Move `amount` from `sender` to the resolved `destination`.
    ///
    /// # Errors
    /// - `Blacklisted`: `sender` is blacklisted
    /// - `InsufficientBalance`: `sender` holds less than `amount`
    /// - `NoRoute` / `CyclicRoute`: `destination` cannot be resolved
    fn transfer(
        &self,
        sender: Address,
        destination: Address,
        amount: U256,
    ) -> Result<TransferReceipt, LedgerError>;

    /// Declare `recipient` as `caller`'s emergency recipient.
    ///
    /// # Errors
    /// - `Blacklisted`: `caller` is blacklisted
    fn set_recipient(&self, caller: Address, recipient: Address) -> Result<(), LedgerError>;

    /// Blacklist the owner and sweep its balance along its recipient chain.
    ///
    /// # Errors
    /// - `Blacklisted`: owner already blacklisted
    /// - `Expired`: deadline is before the current time
    /// - `InvalidSignature`: signature does not recover to the owner
    /// - `NoRoute` / `CyclicRoute`: the owner's chain cannot be resolved
    fn emergency_withdraw(
        &self,
        authorization: &EmergencyWithdrawAuthorization,
    ) -> Result<WithdrawalReceipt, LedgerError>;

    /// Snapshot of the committed event journal, oldest first.
    fn events(&self) -> Vec<LedgerEvent>;
}
