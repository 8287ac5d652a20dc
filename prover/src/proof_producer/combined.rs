//! Combined producer: fans out to the producers of a multi-tier proof and
//! aggregates their sub-proofs once the quorum is reached.

use std::sync::Arc;
use std::time::Instant;

use alloy_consensus::Header;
use alloy_primitives::Address;
use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use multiprover_bindings::{tier::tier_name, BlockMetadata, SubProof};

use crate::metrics::{MetricsGauge, ProverGauge};

use super::error::ProducerError;
use super::state::{ProofStateManager, BLOCK_HISTORY_LENGTH};
use super::{ProofProducer, ProofRequestOptions, ProofWithHeader};

/// Generates proofs from multiple producers in parallel and combines them
/// into a single artifact once `required_proofs` of them succeed.
///
/// Sub-proofs are collected in completion order. Producers whose tier is
/// already recorded for the block are skipped, which makes a retry after a
/// partial failure resume where the previous attempt stopped.
pub struct CombinedProofProducer {
    proof_tier: u16,
    required_proofs: u8,
    producers: Vec<Arc<dyn ProofProducer>>,
    verifiers: Vec<Address>,
    state: Arc<ProofStateManager>,
}

impl CombinedProofProducer {
    /// Build a combined producer over `producers`, with `verifiers[i]` the
    /// on-chain verifier paired with `producers[i]`.
    pub fn new(
        proof_tier: u16,
        required_proofs: u8,
        producers: Vec<Arc<dyn ProofProducer>>,
        verifiers: Vec<Address>,
        state: Arc<ProofStateManager>,
    ) -> Result<Self, ProducerError> {
        if producers.is_empty() {
            return Err(ProducerError::InvalidConfig(
                "at least one producer is required".to_string(),
            ));
        }
        if producers.len() != verifiers.len() {
            return Err(ProducerError::InvalidConfig(format!(
                "got {} producers but {} verifiers",
                producers.len(),
                verifiers.len()
            )));
        }
        if required_proofs == 0 || required_proofs as usize > producers.len() {
            return Err(ProducerError::InvalidConfig(format!(
                "required proofs must be in 1..={}, got {}",
                producers.len(),
                required_proofs
            )));
        }

        Ok(Self {
            proof_tier,
            required_proofs,
            producers,
            verifiers,
            state,
        })
    }

    /// The proof state store shared with the producer tasks.
    pub fn state(&self) -> &Arc<ProofStateManager> {
        &self.state
    }
}

#[async_trait]
impl ProofProducer for CombinedProofProducer {
    async fn request_proof(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
        block_id: u64,
        meta: &BlockMetadata,
        header: &Header,
        request_at: Instant,
    ) -> Result<ProofWithHeader, ProducerError> {
        debug!(
            block_id,
            producers = self.producers.len(),
            "combined producer requesting proof"
        );

        self.state.create(block_id);

        // Child scope for the producer tasks: cancelled on quorum, on outer
        // cancellation, and on every exit path via the guard.
        let task_ctx = ctx.child_token();
        let _cancel_guard = task_ctx.clone().drop_guard();

        let mut tasks: JoinSet<Result<(), ProducerError>> = JoinSet::new();

        for (index, producer) in self.producers.iter().enumerate() {
            if self.state.contains_tier(block_id, producer.tier()) {
                debug!(
                    block_id,
                    tier = tier_name(producer.tier()),
                    "skipping producer, proof already verified"
                );
                continue;
            }

            debug!(
                block_id,
                tier = tier_name(producer.tier()),
                "adding proof producer"
            );

            let producer = Arc::clone(producer);
            let state = Arc::clone(&self.state);
            let verifier = self.verifiers[index];
            let task_ctx = task_ctx.clone();
            let opts = opts.clone();
            let meta = meta.clone();
            let header = header.clone();
            let required = self.required_proofs;

            tasks.spawn(async move {
                let proof_with_header = producer
                    .request_proof(task_ctx.clone(), &opts, block_id, &meta, &header, request_at)
                    .await
                    .map_err(|source| ProducerError::Producer {
                        index,
                        source: Box::new(source),
                    })?;

                let reached_quorum = state.add_tier_and_proof(
                    block_id,
                    producer.tier(),
                    SubProof {
                        verifier,
                        proof: proof_with_header.proof,
                    },
                    required,
                );
                if reached_quorum {
                    task_ctx.cancel();
                }

                Ok(())
            });
        }

        let mut causes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    ProverGauge::ProofRequestErrorCount.increment(1.0);
                    debug!(block_id, %err, "proof producer failed");
                    causes.push(err);
                }
                Err(err) => causes.push(ProducerError::Task(err.to_string())),
            }
        }

        let got = self.state.proof_count(block_id);
        if got < self.required_proofs as usize {
            if ctx.is_cancelled() {
                ProverGauge::CancelledRequestCount.increment(1.0);
                return Err(ProducerError::Cancelled);
            }

            ProverGauge::QuorumMissCount.increment(1.0);
            warn!(
                block_id,
                required = self.required_proofs,
                got,
                "not enough proofs collected"
            );
            return Err(ProducerError::QuorumNotReached {
                required: self.required_proofs,
                got,
                causes,
            });
        }

        let combined_proof = self.state.encode_proofs(block_id)?;

        info!(
            block_id,
            time = ?request_at.elapsed(),
            producer = "combined",
            "combined proofs generated"
        );
        ProverGauge::CombinedProofCount.increment(1.0);

        self.state.clean(block_id, BLOCK_HISTORY_LENGTH);

        Ok(ProofWithHeader {
            block_id,
            header: header.clone(),
            meta: meta.clone(),
            proof: combined_proof.into(),
            opts: opts.clone(),
            tier: self.proof_tier,
        })
    }

    async fn request_cancel(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
    ) -> Result<(), ProducerError> {
        let mut final_error = None;
        for producer in &self.producers {
            if let Err(err) = producer.request_cancel(ctx.clone(), opts).await {
                final_error.get_or_insert(err);
            }
        }
        match final_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn tier(&self) -> u16 {
        self.proof_tier
    }
}
