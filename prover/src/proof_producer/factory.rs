//! Constructs the proof producer serving a protocol tier.

use std::sync::Arc;

use tracing::info;

use multiprover_bindings::tier::{
    tier_name, TIER_GUARDIAN_ID, TIER_GUARDIAN_MINORITY_ID, TIER_OPTIMISTIC_ID, TIER_SGX_ID,
    TIER_TWO_OF_THREE_ID, TIER_ZKVM_RISC0_ID, TIER_ZKVM_SP1_ID,
};
use multiprover_config::ProverConfig;

use super::combined::CombinedProofProducer;
use super::error::ProducerError;
use super::guardian::GuardianProofProducer;
use super::optimistic::OptimisticProofProducer;
use super::sgx::SgxProofProducer;
use super::state::ProofStateManager;
use super::zkvm::ZkvmProofProducer;
use super::ProofProducer;

/// Number of sub-proofs the two-of-three tier requires.
const TWO_OF_THREE_QUORUM: u8 = 2;

/// Build the producer for `tier` from the configured endpoints. The
/// two-of-three tier nests a combined producer over {SGX, RISC0, SP1}
/// backed by `state`.
pub fn new_proof_producer(
    tier: u16,
    config: &ProverConfig,
    state: Arc<ProofStateManager>,
) -> Result<Arc<dyn ProofProducer>, ProducerError> {
    info!(tier = tier_name(tier), "initializing proof producer");

    match tier {
        TIER_OPTIMISTIC_ID => Ok(Arc::new(OptimisticProofProducer)),
        TIER_SGX_ID => Ok(Arc::new(SgxProofProducer::new(&config.raiko))),
        TIER_ZKVM_RISC0_ID => Ok(Arc::new(ZkvmProofProducer::new_risc0(
            &config.raiko,
            &config.risc0,
        ))),
        TIER_ZKVM_SP1_ID => Ok(Arc::new(ZkvmProofProducer::new_sp1(
            &config.raiko,
            &config.sp1,
        ))),
        TIER_TWO_OF_THREE_ID => {
            let producers: Vec<Arc<dyn ProofProducer>> = vec![
                Arc::new(SgxProofProducer::new(&config.raiko)),
                Arc::new(ZkvmProofProducer::new_risc0(&config.raiko, &config.risc0)),
                Arc::new(ZkvmProofProducer::new_sp1(&config.raiko, &config.sp1)),
            ];
            let verifiers = vec![
                config.verifiers.sgx,
                config.verifiers.risc0,
                config.verifiers.sp1,
            ];
            Ok(Arc::new(CombinedProofProducer::new(
                TIER_TWO_OF_THREE_ID,
                TWO_OF_THREE_QUORUM,
                producers,
                verifiers,
                state,
            )?))
        }
        TIER_GUARDIAN_MINORITY_ID | TIER_GUARDIAN_ID => Ok(Arc::new(
            GuardianProofProducer::new(tier, &config.guardian),
        )),
        unknown => Err(ProducerError::UnsupportedTier(unknown)),
    }
}
