//! zkVM tier producer, parametrized by the proving backend.

use std::time::Instant;

use alloy_consensus::Header;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use multiprover_bindings::{
    tier::{tier_name, TIER_ZKVM_RISC0_ID, TIER_ZKVM_SP1_ID},
    BlockMetadata,
};
use multiprover_config::{RaikoConfig, Risc0Config, Sp1Config};

use super::error::ProducerError;
use super::raiko::{ProofRequestBody, RaikoClient, Risc0RequestParams, Sp1RequestParams};
use super::{ProofProducer, ProofRequestOptions, ProofWithHeader};

/// The zkVM proving backend and its host-side parameters.
#[derive(Debug, Clone)]
pub enum ZkvmBackend {
    Risc0(Risc0Config),
    Sp1(Sp1Config),
}

impl ZkvmBackend {
    fn proof_type(&self) -> &'static str {
        match self {
            ZkvmBackend::Risc0(_) => "risc0",
            ZkvmBackend::Sp1(_) => "sp1",
        }
    }
}

/// Requests zkVM proofs from a Raiko host with backend-specific options.
pub struct ZkvmProofProducer {
    raiko: RaikoClient,
    backend: ZkvmBackend,
}

impl ZkvmProofProducer {
    pub fn new_risc0(raiko: &RaikoConfig, config: &Risc0Config) -> Self {
        Self {
            raiko: RaikoClient::new(raiko),
            backend: ZkvmBackend::Risc0(config.clone()),
        }
    }

    pub fn new_sp1(raiko: &RaikoConfig, config: &Sp1Config) -> Self {
        Self {
            raiko: RaikoClient::new(raiko),
            backend: ZkvmBackend::Sp1(config.clone()),
        }
    }

    fn request_body(&self, opts: &ProofRequestOptions, block_id: u64) -> ProofRequestBody {
        let mut body = ProofRequestBody {
            block_number: block_id,
            prover: opts.prover_address,
            graffiti: opts.graffiti,
            proof_type: self.backend.proof_type().to_string(),
            sgx: None,
            risc0: None,
            sp1: None,
        };
        match &self.backend {
            ZkvmBackend::Risc0(config) => {
                body.risc0 = Some(Risc0RequestParams {
                    bonsai: config.bonsai,
                    snark: config.snark,
                    profile: config.profile,
                    execution_po2: config.execution_po2,
                });
            }
            ZkvmBackend::Sp1(config) => {
                body.sp1 = Some(Sp1RequestParams {
                    recursion: config.recursion.clone(),
                    prover: config.prover.clone(),
                });
            }
        }
        body
    }
}

#[async_trait]
impl ProofProducer for ZkvmProofProducer {
    async fn request_proof(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
        block_id: u64,
        meta: &BlockMetadata,
        header: &Header,
        request_at: Instant,
    ) -> Result<ProofWithHeader, ProducerError> {
        debug!(block_id, backend = self.backend.proof_type(), "requesting zkVM proof");

        let proof = self
            .raiko
            .request_proof(ctx, &self.request_body(opts, block_id))
            .await?;

        info!(
            block_id,
            time = ?request_at.elapsed(),
            producer = tier_name(self.tier()),
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
        match self.backend {
            ZkvmBackend::Risc0(_) => TIER_ZKVM_RISC0_ID,
            ZkvmBackend::Sp1(_) => TIER_ZKVM_SP1_ID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn raiko_config() -> RaikoConfig {
        RaikoConfig {
            host: Url::parse("http://localhost:8080").unwrap(),
            jwt_secret: "secret".to_string(),
            request_timeout_secs: 600,
        }
    }

    #[test]
    fn risc0_body_carries_backend_parameters() {
        let producer = ZkvmProofProducer::new_risc0(
            &raiko_config(),
            &Risc0Config {
                bonsai: true,
                snark: true,
                profile: false,
                execution_po2: 21,
            },
        );

        let body = producer.request_body(&ProofRequestOptions::default(), 3);
        assert_eq!(body.proof_type, "risc0");
        let risc0 = body.risc0.unwrap();
        assert!(risc0.bonsai);
        assert_eq!(risc0.execution_po2, 21);
        assert!(body.sp1.is_none());
        assert_eq!(producer.tier(), TIER_ZKVM_RISC0_ID);
    }

    #[test]
    fn sp1_body_carries_backend_parameters() {
        let producer = ZkvmProofProducer::new_sp1(
            &raiko_config(),
            &Sp1Config {
                recursion: "plonk".to_string(),
                prover: "network".to_string(),
            },
        );

        let body = producer.request_body(&ProofRequestOptions::default(), 3);
        assert_eq!(body.proof_type, "sp1");
        let sp1 = body.sp1.unwrap();
        assert_eq!(sp1.recursion, "plonk");
        assert!(body.risc0.is_none());
        assert_eq!(producer.tier(), TIER_ZKVM_SP1_ID);
    }
}
