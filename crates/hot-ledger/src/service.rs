//! # Hot Ledger Service
//!
//! Application service layer that implements the `HotLedgerApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`HotLedgerApi`)
//! - Reads the current time through the outbound `TimeSource` port
//! - Delegates every rule to the `Ledger` aggregate
//! - Emits logs and metrics for each outcome
//!
//! ## Isolation
//!
//! The aggregate sits behind one `RwLock`. Queries share the read lock and
//! commands take the write lock, so concurrent callers observe some serial
//! order of whole operations.

use crate::config::{ConfigError, LedgerConfig};
use crate::domain::entities::to_hex;
use crate::domain::{
    Address, EmergencyWithdrawAuthorization, Hash, Ledger, LedgerError, LedgerEvent, Resolution,
    Timestamp, TokenMetadata, TransferReceipt, WithdrawalReceipt,
};
use crate::ports::inbound::HotLedgerApi;
use crate::ports::outbound::{SignerRecovery, TimeSource};
use hot_telemetry::{
    log_ledger_event, metric_inc, metric_observe, BLACKLISTED_ACCOUNTS, EMERGENCY_WITHDRAWALS,
    LEDGER_ERRORS, REROUTED_CREDITS, RESOLUTION_HOPS, TRANSFERS,
};
use parking_lot::RwLock;
use primitive_types::U256;
use tracing::{debug, info, warn};

const COMMITTED: &str = "committed";

/// Hot Ledger Service.
///
/// Generic over the signer recovery capability and the clock so both can be
/// replaced in tests.
pub struct HotLedgerService<R: SignerRecovery, T: TimeSource> {
    metadata: TokenMetadata,
    ledger: RwLock<Ledger<R>>,
    clock: T,
}

impl<R: SignerRecovery, T: TimeSource> HotLedgerService<R, T> {
    /// Wrap an existing ledger.
    pub fn new(metadata: TokenMetadata, ledger: Ledger<R>, clock: T) -> Self {
        Self {
            metadata,
            ledger: RwLock::new(ledger),
            clock,
        }
    }

    /// Build a fresh ledger from configuration.
    pub fn from_config(config: &LedgerConfig, recovery: R, clock: T) -> Result<Self, ConfigError> {
        config.validate()?;

        let ledger = Ledger::new(
            config.total_supply,
            config.initial_holder,
            config.domain(),
            recovery,
        );

        info!(
            name = %config.name,
            chain_id = config.chain_id,
            ledger = %to_hex(&config.ledger_address),
            holder = %to_hex(&config.initial_holder),
            supply = %config.total_supply,
            "Ledger initialized"
        );

        Ok(Self::new(config.metadata(), ledger, clock))
    }

    /// Current time as seen by this service.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Number of blacklisted accounts.
    pub fn blacklisted_count(&self) -> usize {
        self.ledger.read().blacklisted_count()
    }
}

fn record_error(error: &LedgerError) {
    metric_inc!(LEDGER_ERRORS, &[error.kind()]);
}

fn is_routing_error(error: &LedgerError) -> bool {
    matches!(
        error,
        LedgerError::NoRoute { .. } | LedgerError::CyclicRoute { .. }
    )
}

impl<R: SignerRecovery, T: TimeSource> HotLedgerApi for HotLedgerService<R, T> {
    fn metadata(&self) -> TokenMetadata {
        self.metadata.clone()
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.ledger.read().balance_of(account)
    }

    fn total_supply(&self) -> U256 {
        self.ledger.read().total_supply()
    }

    fn is_blacklisted(&self, account: &Address) -> bool {
        self.ledger.read().is_blacklisted(account)
    }

    fn get_recipient(&self, account: &Address) -> Option<Address> {
        self.ledger.read().get_recipient(account)
    }

    fn resolve_recipient(&self, destination: &Address) -> Result<Resolution, LedgerError> {
        self.ledger.read().resolve(*destination)
    }

    fn domain_separator(&self) -> Hash {
        self.ledger.read().domain_separator()
    }

    fn emergency_withdraw_digest(&self, owner: &Address, deadline: Timestamp) -> Hash {
        self.ledger
            .read()
            .emergency_withdraw_digest(owner, deadline)
    }

    fn transfer(
        &self,
        sender: Address,
        destination: Address,
        amount: U256,
    ) -> Result<TransferReceipt, LedgerError> {
        let result = self.ledger.write().transfer(sender, destination, amount);

        match &result {
            Ok(receipt) => {
                metric_inc!(TRANSFERS, &[COMMITTED]);
                if receipt.rerouted() {
                    metric_inc!(REROUTED_CREDITS);
                    metric_observe!(RESOLUTION_HOPS, receipt.hops as f64);
                    info!(
                        from = %to_hex(&sender),
                        nominal = %to_hex(&destination),
                        resolved = %to_hex(&receipt.recipient),
                        hops = receipt.hops,
                        %amount,
                        "Transfer rerouted"
                    );
                } else {
                    info!(
                        from = %to_hex(&sender),
                        to = %to_hex(&destination),
                        %amount,
                        "Transfer committed"
                    );
                }
            }
            Err(error) => {
                metric_inc!(TRANSFERS, &[error.kind()]);
                record_error(error);
                if is_routing_error(error) {
                    warn!(
                        from = %to_hex(&sender),
                        to = %to_hex(&destination),
                        %error,
                        "Transfer rejected: destination unresolvable"
                    );
                } else {
                    debug!(from = %to_hex(&sender), %error, "Transfer rejected");
                }
            }
        }

        result
    }

    fn set_recipient(&self, caller: Address, recipient: Address) -> Result<(), LedgerError> {
        let result = self.ledger.write().set_recipient(caller, recipient);

        match &result {
            Ok(()) => log_ledger_event!(
                info,
                "recipients",
                "Emergency recipient set",
                account = %to_hex(&caller),
                recipient = %to_hex(&recipient)
            ),
            Err(error) => {
                record_error(error);
                debug!(account = %to_hex(&caller), %error, "Emergency recipient rejected");
            }
        }

        result
    }

    fn emergency_withdraw(
        &self,
        authorization: &EmergencyWithdrawAuthorization,
    ) -> Result<WithdrawalReceipt, LedgerError> {
        let now = self.clock.now();
        let owner = authorization.owner;

        let (result, blacklisted) = {
            let mut ledger = self.ledger.write();
            let result = ledger.emergency_withdraw(authorization, now);
            (result, ledger.blacklisted_count())
        };

        match &result {
            Ok(receipt) => {
                metric_inc!(EMERGENCY_WITHDRAWALS, &[COMMITTED]);
                metric_inc!(REROUTED_CREDITS);
                metric_observe!(RESOLUTION_HOPS, receipt.hops as f64);
                BLACKLISTED_ACCOUNTS.set(blacklisted as f64);
                log_ledger_event!(
                    info,
                    "emergency",
                    "Emergency withdraw committed",
                    owner = %to_hex(&owner),
                    recipient = %to_hex(&receipt.recipient),
                    hops = receipt.hops,
                    amount = %receipt.amount
                );
            }
            Err(error) => {
                metric_inc!(EMERGENCY_WITHDRAWALS, &[error.kind()]);
                record_error(error);
                warn!(
                    owner = %to_hex(&owner),
                    deadline = authorization.deadline,
                    now,
                    %error,
                    "Emergency withdraw rejected"
                );
            }
        }

        result
    }

    fn events(&self) -> Vec<LedgerEvent> {
        self.ledger.read().events().to_vec()
    }
}
