//! Optimistic tier producer.

use std::time::Instant;

use alloy_consensus::Header;
use alloy_primitives::Bytes;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use multiprover_bindings::{tier::TIER_OPTIMISTIC_ID, BlockMetadata};

use super::error::ProducerError;
use super::{ProofProducer, ProofRequestOptions, ProofWithHeader};

/// Length of the placeholder payload emitted for proofless tiers.
const DUMMY_PROOF_LEN: usize = 100;

/// Produces a placeholder proof immediately. The optimistic tier asserts
/// correctness without cryptographic evidence; disputes are settled by
/// higher tiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimisticProofProducer;

#[async_trait]
impl ProofProducer for OptimisticProofProducer {
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

        debug!(block_id, "requesting optimistic proof");

        let proof = Bytes::from(vec![0xff; DUMMY_PROOF_LEN]);
        info!(
            block_id,
            time = ?request_at.elapsed(),
            producer = "optimistic",
            "proof generated"
        );

        Ok(ProofWithHeader {
            block_id,
            header: header.clone(),
            meta: meta.clone(),
            proof,
            opts: opts.clone(),
            tier: self.tier(),
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
        TIER_OPTIMISTIC_ID
    }
}
