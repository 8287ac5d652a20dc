//! Guardian tier producer.

use std::time::Instant;

use alloy_consensus::Header;
use alloy_primitives::{keccak256, Bytes, B256};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use multiprover_bindings::{tier::tier_name, BlockMetadata};
use multiprover_config::GuardianConfig;

use super::error::ProducerError;
use super::{ProofProducer, ProofRequestOptions, ProofWithHeader};

/// Preimage of the sentinel payload that instructs the protocol to release
/// the liveness bond instead of checking an attestation.
pub const LIVENESS_BOND_SENTINEL: &[u8] = b"RETURN_LIVENESS_BOND";

/// Produces guardian attestations locally. The guardian set approves blocks
/// out-of-band; the payload here only binds the approval to an identity and
/// the block being attested.
pub struct GuardianProofProducer {
    proof_tier: u16,
    identity: B256,
    return_liveness_bond: bool,
}

impl GuardianProofProducer {
    pub fn new(proof_tier: u16, config: &GuardianConfig) -> Self {
        Self {
            proof_tier,
            identity: config.identity,
            return_liveness_bond: config.return_liveness_bond,
        }
    }

    /// Attestation over the guardian identity and the attested block.
    fn attestation(&self, block_id: u64, header: &Header) -> Bytes {
        let mut payload = Vec::with_capacity(72);
        payload.extend_from_slice(self.identity.as_slice());
        payload.extend_from_slice(&block_id.to_be_bytes());
        payload.extend_from_slice(header.hash_slow().as_slice());
        Bytes::copy_from_slice(keccak256(&payload).as_slice())
    }
}

#[async_trait]
impl ProofProducer for GuardianProofProducer {
    async fn request_proof(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
        block_id: u64,
        meta: &BlockMetadata,
        header: &Header,
        request_at: Instant,
    ) -> Result<ProofWithHeader, ProducerError> {
        if ctx.is_cancelled() {
            return Err(ProducerError::Cancelled);
        }

        debug!(
            block_id,
            return_liveness_bond = self.return_liveness_bond,
            "requesting guardian proof"
        );

        let proof = if self.return_liveness_bond {
            Bytes::copy_from_slice(keccak256(LIVENESS_BOND_SENTINEL).as_slice())
        } else {
            self.attestation(block_id, header)
        };

        info!(
            block_id,
            time = ?request_at.elapsed(),
            producer = tier_name(self.proof_tier),
            "proof generated"
        );

        Ok(ProofWithHeader {
            block_id,
            header: header.clone(),
            meta: meta.clone(),
            proof,
            opts: opts.clone(),
            tier: self.proof_tier,
        })
    }

    async fn request_cancel(
        &self,
        _ctx: CancellationToken,
        _opts: &ProofRequestOptions,
    ) -> Result<(), ProducerError> {
        Ok(())
    }

    fn tier(&self) -> u16 {
        self.proof_tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiprover_bindings::tier::{TIER_GUARDIAN_ID, TIER_GUARDIAN_MINORITY_ID};

    fn config(return_liveness_bond: bool) -> GuardianConfig {
        GuardianConfig {
            identity: B256::repeat_byte(0x42),
            return_liveness_bond,
        }
    }

    #[tokio::test]
    async fn attestation_binds_identity_and_block() {
        let producer = GuardianProofProducer::new(TIER_GUARDIAN_ID, &config(false));
        let header = Header::default();

        let result = producer
            .request_proof(
                CancellationToken::new(),
                &ProofRequestOptions::default(),
                5,
                &BlockMetadata::default(),
                &header,
                Instant::now(),
            )
            .await
            .unwrap();

        let mut payload = Vec::new();
        payload.extend_from_slice(B256::repeat_byte(0x42).as_slice());
        payload.extend_from_slice(&5u64.to_be_bytes());
        payload.extend_from_slice(header.hash_slow().as_slice());
        assert_eq!(result.proof.as_ref(), keccak256(&payload).as_slice());
        assert_eq!(result.tier, TIER_GUARDIAN_ID);
    }

    #[tokio::test]
    async fn liveness_bond_mode_emits_the_sentinel_payload() {
        let producer = GuardianProofProducer::new(TIER_GUARDIAN_MINORITY_ID, &config(true));

        let result = producer
            .request_proof(
                CancellationToken::new(),
                &ProofRequestOptions::default(),
                5,
                &BlockMetadata::default(),
                &Header::default(),
                Instant::now(),
            )
            .await
            .unwrap();

        assert_eq!(
            result.proof.as_ref(),
            keccak256(LIVENESS_BOND_SENTINEL).as_slice()
        );
    }

    #[tokio::test]
    async fn attestations_differ_per_block() {
        let producer = GuardianProofProducer::new(TIER_GUARDIAN_ID, &config(false));
        let header = Header::default();
        let (opts, meta) = (ProofRequestOptions::default(), BlockMetadata::default());

        let ctx = CancellationToken::new();
        let first = producer
            .request_proof(ctx.clone(), &opts, 5, &meta, &header, Instant::now())
            .await
            .unwrap();
        let second = producer
            .request_proof(ctx, &opts, 6, &meta, &header, Instant::now())
            .await
            .unwrap();
        assert_ne!(first.proof, second.proof);
    }
}
