//! SGX tier producer, backed by a remote Raiko host.

use std::time::Instant;

use alloy_consensus::Header;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use multiprover_bindings::{tier::TIER_SGX_ID, BlockMetadata};
use multiprover_config::RaikoConfig;

use super::error::ProducerError;
use super::raiko::{ProofRequestBody, RaikoClient, SgxRequestParams};
use super::{ProofProducer, ProofRequestOptions, ProofWithHeader};

const PROOF_TYPE: &str = "sgx";

/// Requests SGX attestation proofs from a Raiko host.
pub struct SgxProofProducer {
    raiko: RaikoClient,
    setup: bool,
    bootstrap: bool,
    prove: bool,
}

impl SgxProofProducer {
    pub fn new(config: &RaikoConfig) -> Self {
        Self {
            raiko: RaikoClient::new(config),
            setup: false,
            bootstrap: false,
            prove: true,
        }
    }

    fn request_body(&self, opts: &ProofRequestOptions, block_id: u64) -> ProofRequestBody {
        ProofRequestBody {
            block_number: block_id,
            prover: opts.prover_address,
            graffiti: opts.graffiti,
            proof_type: PROOF_TYPE.to_string(),
            sgx: Some(SgxRequestParams {
                setup: self.setup,
                bootstrap: self.bootstrap,
                prove: self.prove,
            }),
            risc0: None,
            sp1: None,
        }
    }
}

#[async_trait]
impl ProofProducer for SgxProofProducer {
    async fn request_proof(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
        block_id: u64,
        meta: &BlockMetadata,
        header: &Header,
        request_at: Instant,
    ) -> Result<ProofWithHeader, ProducerError> {
        debug!(block_id, "requesting SGX proof");

        let proof = self
            .raiko
            .request_proof(ctx, &self.request_body(opts, block_id))
            .await?;

        info!(
            block_id,
            time = ?request_at.elapsed(),
            producer = "sgx",
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
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
    ) -> Result<(), ProducerError> {
        self.raiko
            .cancel_proof(ctx, &self.request_body(opts, opts.block_id))
            .await
    }

    fn tier(&self) -> u16 {
        TIER_SGX_ID
    }
}
