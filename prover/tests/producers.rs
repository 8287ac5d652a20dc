//! End-to-end checks of tier construction and the network-free producers.

use std::sync::Arc;
use std::time::Instant;

use alloy_consensus::Header;
use alloy_primitives::{address, keccak256, B256};
use tokio_util::sync::CancellationToken;
use url::Url;

use multiprover::proof_producer::{
    new_proof_producer, ProducerError, ProofRequestOptions, ProofStateManager,
};
use multiprover_bindings::tier::{
    TIER_GUARDIAN_ID, TIER_GUARDIAN_MINORITY_ID, TIER_OPTIMISTIC_ID, TIER_SGX_ID,
    TIER_TWO_OF_THREE_ID, TIER_ZKVM_RISC0_ID, TIER_ZKVM_SP1_ID,
};
use multiprover_bindings::BlockMetadata;
use multiprover_config::{
    GuardianConfig, ProverConfig, RaikoConfig, Risc0Config, Sp1Config, VerifierConfig,
};

fn test_config() -> ProverConfig {
    ProverConfig {
        raiko: RaikoConfig {
            host: Url::parse("http://localhost:8080").unwrap(),
            jwt_secret: "secret".to_string(),
            request_timeout_secs: 600,
        },
        risc0: Risc0Config {
            bonsai: false,
            snark: true,
            profile: false,
            execution_po2: 20,
        },
        sp1: Sp1Config {
            recursion: "plonk".to_string(),
            prover: "network".to_string(),
        },
        guardian: GuardianConfig {
            identity: B256::repeat_byte(0x42),
            return_liveness_bond: false,
        },
        verifiers: VerifierConfig {
            sgx: address!("1000000000000000000000000000000000000001"),
            risc0: address!("1000000000000000000000000000000000000002"),
            sp1: address!("1000000000000000000000000000000000000003"),
            guardian: address!("1000000000000000000000000000000000000004"),
        },
    }
}

#[test]
fn factory_builds_every_known_tier() {
    let config = test_config();
    for tier in [
        TIER_OPTIMISTIC_ID,
        TIER_SGX_ID,
        TIER_ZKVM_RISC0_ID,
        TIER_ZKVM_SP1_ID,
        TIER_TWO_OF_THREE_ID,
        TIER_GUARDIAN_MINORITY_ID,
        TIER_GUARDIAN_ID,
    ] {
        let producer =
            new_proof_producer(tier, &config, Arc::new(ProofStateManager::new())).unwrap();
        assert_eq!(producer.tier(), tier);
    }
}

#[test]
fn factory_rejects_unknown_tier() {
    let result = new_proof_producer(7, &test_config(), Arc::new(ProofStateManager::new()));
    assert!(matches!(result, Err(ProducerError::UnsupportedTier(7))));
}

#[tokio::test]
async fn optimistic_tier_proves_without_a_backend() {
    let producer = new_proof_producer(
        TIER_OPTIMISTIC_ID,
        &test_config(),
        Arc::new(ProofStateManager::new()),
    )
    .unwrap();

    let result = producer
        .request_proof(
            CancellationToken::new(),
            &ProofRequestOptions {
                block_id: 11,
                ..Default::default()
            },
            11,
            &BlockMetadata::default(),
            &Header::default(),
            Instant::now(),
        )
        .await
        .unwrap();

    assert_eq!(result.block_id, 11);
    assert_eq!(result.tier, TIER_OPTIMISTIC_ID);
    assert!(!result.proof.is_empty());
}

#[tokio::test]
async fn guardian_tier_attests_the_requested_block() {
    let config = test_config();
    let producer = new_proof_producer(
        TIER_GUARDIAN_ID,
        &config,
        Arc::new(ProofStateManager::new()),
    )
    .unwrap();

    let header = Header::default();
    let result = producer
        .request_proof(
            CancellationToken::new(),
            &ProofRequestOptions::default(),
            23,
            &BlockMetadata::default(),
            &header,
            Instant::now(),
        )
        .await
        .unwrap();

    let mut payload = Vec::new();
    payload.extend_from_slice(config.guardian.identity.as_slice());
    payload.extend_from_slice(&23u64.to_be_bytes());
    payload.extend_from_slice(header.hash_slow().as_slice());
    assert_eq!(result.proof.as_ref(), keccak256(&payload).as_slice());
}

#[tokio::test]
async fn guardian_liveness_bond_mode_is_configurable() {
    let mut config = test_config();
    config.guardian.return_liveness_bond = true;

    let producer = new_proof_producer(
        TIER_GUARDIAN_ID,
        &config,
        Arc::new(ProofStateManager::new()),
    )
    .unwrap();

    let result = producer
        .request_proof(
            CancellationToken::new(),
            &ProofRequestOptions::default(),
            23,
            &BlockMetadata::default(),
            &Header::default(),
            Instant::now(),
        )
        .await
        .unwrap();

    assert_eq!(
        result.proof.as_ref(),
        keccak256(b"RETURN_LIVENESS_BOND").as_slice()
    );
}
