//! # Emergency Withdraw Flows
//!
//! Replays the lifecycle of a compromised account:
//!
//! 1. Owner and bob declare emergency recipients (bob -> owner -> alice)
//! 2. Stale and forged authorizations are refused
//! 3. Bob relays owner's signed authorization; alice receives the balance
//! 4. The blacklisted owner can neither re-route nor withdraw again
//! 5. Later transfers addressed to owner land on alice
//! 6. Bob's own withdraw walks through blacklisted owner to alice

#[cfg(test)]
mod tests {
    use crate::fixtures::{units, Actor, Deployment, GENESIS_TIME};
    use hot_ledger::{
        EcdsaSignature, EmergencyWithdrawAuthorization, FixedTimeSource, HotLedgerApi,
        HotLedgerService, LedgerConfig, LedgerError, LedgerEvent, Resolution, Secp256k1Recovery,
        TypedDataDomain, U256,
    };

    fn zero_signature() -> EcdsaSignature {
        EcdsaSignature::new(0, [0u8; 32], [0u8; 32])
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    #[test]
    fn test_compromised_account_lifecycle() {
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (owner, alice, bob) = (Actor::random(), Actor::random(), Actor::random());

        deployment.fund(&owner, units(1000));

        // Domain separator binds the default deployment parameters.
        assert_eq!(
            ledger.domain_separator(),
            TypedDataDomain::new("HotERC20", "1", 31337, LedgerConfig::default().ledger_address)
                .separator()
        );

        // Recipients: bob -> owner, owner -> alice.
        ledger.set_recipient(bob.address, owner.address).unwrap();
        assert_eq!(ledger.get_recipient(&bob.address), Some(owner.address));
        ledger.set_recipient(owner.address, alice.address).unwrap();
        assert_eq!(ledger.get_recipient(&owner.address), Some(alice.address));

        // Expired authorization, checked before the (garbage) signature.
        let expired = EmergencyWithdrawAuthorization {
            owner: owner.address,
            deadline: deployment.now() - 1,
            signature: zero_signature(),
        };
        assert!(matches!(
            ledger.emergency_withdraw(&expired),
            Err(LedgerError::Expired { .. })
        ));

        // A genuine signature replayed with another deadline or owner.
        let deadline = deployment.now() + 1;
        let signed = owner.authorize_withdraw(ledger, deadline);
        let wrong_deadline = EmergencyWithdrawAuthorization {
            deadline: deadline + 1,
            ..signed
        };
        assert_eq!(
            ledger.emergency_withdraw(&wrong_deadline),
            Err(LedgerError::InvalidSignature {
                owner: owner.address
            })
        );
        let wrong_owner = EmergencyWithdrawAuthorization {
            owner: alice.address,
            deadline: deadline + 1,
            ..signed
        };
        assert_eq!(
            ledger.emergency_withdraw(&wrong_owner),
            Err(LedgerError::InvalidSignature {
                owner: alice.address
            })
        );
        assert!(!ledger.is_blacklisted(&owner.address));

        // Bob relays owner's authorization; who submits it does not matter.
        let receipt = ledger.emergency_withdraw(&signed).unwrap();
        assert_eq!(receipt.recipient, alice.address);
        assert_eq!(receipt.amount, units(1000));
        assert_eq!(ledger.balance_of(&alice.address), units(1000));
        assert_eq!(ledger.balance_of(&owner.address), U256::zero());
        assert!(ledger.is_blacklisted(&owner.address));

        // Owner is frozen out of the recipient registry.
        assert_eq!(
            ledger.set_recipient(owner.address, bob.address),
            Err(LedgerError::Blacklisted {
                account: owner.address
            })
        );
        // Naming a blacklisted account as one's own recipient is allowed.
        assert!(ledger.set_recipient(alice.address, owner.address).is_ok());

        // A second withdraw is refused before expiry or signature are looked at.
        let again = EmergencyWithdrawAuthorization {
            owner: owner.address,
            deadline: deployment.now() - 1,
            signature: zero_signature(),
        };
        assert_eq!(
            ledger.emergency_withdraw(&again),
            Err(LedgerError::Blacklisted {
                account: owner.address
            })
        );

        // Transfers addressed to owner are rerouted to alice.
        let transfer = ledger
            .transfer(deployment.deployer.address, owner.address, units(1000))
            .unwrap();
        assert!(transfer.rerouted());
        assert_eq!(ledger.balance_of(&alice.address), units(2000));
        assert_eq!(ledger.balance_of(&owner.address), U256::zero());

        // Bob withdraws: bob -> owner (blacklisted) -> alice.
        ledger
            .transfer(deployment.deployer.address, alice.address, units(1000))
            .unwrap();
        deployment.fund(&bob, units(1000));

        let receipt = ledger
            .emergency_withdraw(&bob.authorize_withdraw(ledger, deployment.now() + 1))
            .unwrap();
        assert_eq!(receipt.recipient, alice.address);
        assert_eq!(receipt.hops, 2);
        assert_eq!(ledger.balance_of(&alice.address), units(4000));
        assert_eq!(ledger.balance_of(&bob.address), U256::zero());
        assert!(ledger.is_blacklisted(&bob.address));
        assert_eq!(
            ledger.balance_of(&deployment.deployer.address),
            ledger.total_supply() - units(4000)
        );
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_plain_transfer_from_holder() {
        let deployment = Deployment::new();
        let x = Actor::random();

        deployment.fund(&x, U256::from(1000));
        assert_eq!(deployment.service.balance_of(&x.address), U256::from(1000));
        assert_eq!(
            deployment.service.total_supply(),
            U256::from(1_000_000u64) * U256::exp10(18)
        );
    }

    #[test]
    fn test_withdraw_sweeps_to_clean_recipient() {
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (x, y) = (Actor::random(), Actor::random());

        deployment.fund(&x, U256::from(1000));
        ledger.set_recipient(x.address, y.address).unwrap();
        ledger
            .emergency_withdraw(&x.authorize_withdraw(ledger, GENESIS_TIME))
            .unwrap();

        assert!(ledger.is_blacklisted(&x.address));
        assert_eq!(ledger.balance_of(&y.address), U256::from(1000));
        assert_eq!(ledger.balance_of(&x.address), U256::zero());
    }

    #[test]
    fn test_clean_destination_is_credited_directly() {
        // bob -> owner(blacklisted) -> alice, but bob is not blacklisted.
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (owner, alice, bob) = (Actor::random(), Actor::random(), Actor::random());

        ledger.set_recipient(bob.address, owner.address).unwrap();
        ledger.set_recipient(owner.address, alice.address).unwrap();
        ledger
            .emergency_withdraw(&owner.authorize_withdraw(ledger, GENESIS_TIME))
            .unwrap();

        let receipt = ledger
            .transfer(deployment.deployer.address, bob.address, U256::from(1000))
            .unwrap();
        assert!(!receipt.rerouted());
        assert_eq!(ledger.balance_of(&bob.address), U256::from(1000));
        assert_eq!(ledger.balance_of(&alice.address), U256::zero());
    }

    #[test]
    fn test_mutual_recipients_cannot_both_be_blacklisted() {
        // a <-> b: the second withdraw would have nowhere to go.
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (a, b) = (Actor::random(), Actor::random());

        ledger.set_recipient(a.address, b.address).unwrap();
        ledger.set_recipient(b.address, a.address).unwrap();
        deployment.fund(&a, U256::from(10));
        ledger
            .emergency_withdraw(&a.authorize_withdraw(ledger, GENESIS_TIME))
            .unwrap();
        assert_eq!(ledger.balance_of(&b.address), U256::from(10));

        let events = ledger.events().len();
        assert!(matches!(
            ledger.emergency_withdraw(&b.authorize_withdraw(ledger, GENESIS_TIME)),
            Err(LedgerError::CyclicRoute { .. })
        ));
        assert!(!ledger.is_blacklisted(&b.address));
        assert_eq!(ledger.balance_of(&b.address), U256::from(10));
        assert_eq!(ledger.events().len(), events);
        assert_eq!(
            ledger.resolve_recipient(&a.address),
            Ok(Resolution {
                recipient: b.address,
                hops: 1
            })
        );
    }

    #[test]
    fn test_withdraw_without_recipient_has_no_route() {
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let x = Actor::random();
        deployment.fund(&x, U256::from(5));

        assert_eq!(
            ledger.emergency_withdraw(&x.authorize_withdraw(ledger, GENESIS_TIME)),
            Err(LedgerError::NoRoute { account: x.address })
        );
        assert!(!ledger.is_blacklisted(&x.address));
    }

    #[test]
    fn test_authorization_bound_to_chain() {
        let deployment = Deployment::new();
        let (owner, alice) = (Actor::random(), Actor::random());
        let config = LedgerConfig {
            chain_id: 1,
            initial_holder: deployment.deployer.address,
            ..LedgerConfig::default()
        };
        let other_chain = HotLedgerService::from_config(
            &config,
            Secp256k1Recovery::new(),
            FixedTimeSource::new(GENESIS_TIME),
        )
        .unwrap();
        other_chain
            .set_recipient(owner.address, alice.address)
            .unwrap();
        assert_ne!(
            other_chain.domain_separator(),
            deployment.service.domain_separator()
        );

        let auth = owner.authorize_withdraw(&deployment.service, GENESIS_TIME);
        assert_eq!(
            other_chain.emergency_withdraw(&auth),
            Err(LedgerError::InvalidSignature {
                owner: owner.address
            })
        );
    }

    #[test]
    fn test_deadline_boundary_follows_clock() {
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (x, y) = (Actor::random(), Actor::random());
        ledger.set_recipient(x.address, y.address).unwrap();

        let auth = x.authorize_withdraw(ledger, GENESIS_TIME + 60);
        deployment.clock.advance(61);
        assert!(matches!(
            ledger.emergency_withdraw(&auth),
            Err(LedgerError::Expired { .. })
        ));

        deployment.clock.set(GENESIS_TIME + 60);
        assert!(ledger.emergency_withdraw(&auth).is_ok());
    }

    #[test]
    fn test_journal_records_reroute() {
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (owner, alice) = (Actor::random(), Actor::random());

        ledger.set_recipient(owner.address, alice.address).unwrap();
        ledger
            .emergency_withdraw(&owner.authorize_withdraw(ledger, GENESIS_TIME))
            .unwrap();
        ledger
            .transfer(deployment.deployer.address, owner.address, U256::from(3))
            .unwrap();

        let events = ledger.events();
        assert_eq!(
            &events[events.len() - 2..],
            &[
                LedgerEvent::Rerouted {
                    nominal: owner.address,
                    resolved: alice.address,
                    hops: 1
                },
                LedgerEvent::Transfer {
                    from: deployment.deployer.address,
                    to: alice.address,
                    amount: U256::from(3)
                },
            ]
        );
    }

    #[test]
    fn test_metrics_exposition_lists_ledger_counters() {
        hot_telemetry::register_metrics().ok();
        let deployment = Deployment::new();
        deployment.fund(&Actor::random(), U256::from(1));

        let text = hot_telemetry::encode_metrics().unwrap();
        assert!(text.contains("hot_ledger_transfers_total"));
    }

    #[test]
    fn test_wire_signature_roundtrip_still_verifies() {
        let deployment = Deployment::new();
        let ledger = &deployment.service;
        let (x, y) = (Actor::random(), Actor::random());
        ledger.set_recipient(x.address, y.address).unwrap();

        let auth = x.authorize_withdraw(ledger, GENESIS_TIME);
        let wire = hex::encode(auth.signature.to_bytes());
        let decoded = EcdsaSignature::from_bytes(&hex::decode(wire).unwrap()).unwrap();

        let relayed = EmergencyWithdrawAuthorization {
            signature: decoded,
            ..auth
        };
        assert!(ledger.emergency_withdraw(&relayed).is_ok());
    }
}
