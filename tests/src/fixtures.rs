//! Shared fixtures: actors holding real signing keys and a deployed ledger.

use hot_ledger::{
    address_from_pubkey, Address, EcdsaSignature, EmergencyWithdrawAuthorization,
    FixedTimeSource, HotLedgerApi, HotLedgerService, LedgerConfig, Secp256k1Recovery,
    Timestamp, U256,
};
use k256::ecdsa::{RecoveryId, SigningKey};
use std::sync::Arc;

/// Starting time of every deployment.
pub const GENESIS_TIME: Timestamp = 1_700_000_000;

/// Service type used throughout the suite.
pub type Service = HotLedgerService<Secp256k1Recovery, Arc<FixedTimeSource>>;

/// `n` whole tokens at 18 decimals.
pub fn units(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

/// An account controlled by a freshly generated key.
pub struct Actor {
    key: SigningKey,
    pub address: Address,
}

impl Actor {
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// Sign a prehashed digest as a wallet would: low S, v in {27, 28}.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> EcdsaSignature {
        let (mut signature, mut recovery_id) = self
            .key
            .sign_prehash_recoverable(digest)
            .expect("signing a 32-byte digest cannot fail");

        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        EcdsaSignature::new(recovery_id.to_byte() + 27, r, s)
    }

    /// Authorize an emergency withdraw of this actor's own balance.
    pub fn authorize_withdraw(
        &self,
        ledger: &impl HotLedgerApi,
        deadline: Timestamp,
    ) -> EmergencyWithdrawAuthorization {
        let digest = ledger.emergency_withdraw_digest(&self.address, deadline);
        EmergencyWithdrawAuthorization {
            owner: self.address,
            deadline,
            signature: self.sign_digest(&digest),
        }
    }
}

/// A ledger deployed with the default configuration, minting to `deployer`.
pub struct Deployment {
    pub deployer: Actor,
    pub clock: Arc<FixedTimeSource>,
    pub service: Service,
}

impl Deployment {
    pub fn new() -> Self {
        let deployer = Actor::random();
        let config = LedgerConfig {
            initial_holder: deployer.address,
            ..LedgerConfig::default()
        };
        let clock = Arc::new(FixedTimeSource::new(GENESIS_TIME));
        let service =
            HotLedgerService::from_config(&config, Secp256k1Recovery::new(), Arc::clone(&clock))
                .expect("default configuration is valid");

        Self {
            deployer,
            clock,
            service,
        }
    }

    /// Current ledger time.
    pub fn now(&self) -> Timestamp {
        self.service.now()
    }

    /// Fund `to` from the deployer.
    pub fn fund(&self, to: &Actor, amount: U256) {
        self.service
            .transfer(self.deployer.address, to.address, amount)
            .expect("deployer holds the supply");
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}
