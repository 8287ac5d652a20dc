//! Proof producers for every tier of the protocol, plus the combined
//! producer that aggregates them.

use std::time::Instant;

use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use multiprover_bindings::BlockMetadata;

pub mod combined;
pub mod error;
pub mod factory;
pub mod guardian;
pub mod optimistic;
pub mod raiko;
pub mod sgx;
pub mod state;
pub mod zkvm;

pub use combined::CombinedProofProducer;
pub use error::ProducerError;
pub use factory::new_proof_producer;
pub use guardian::GuardianProofProducer;
pub use optimistic::OptimisticProofProducer;
pub use sgx::SgxProofProducer;
pub use state::{ProofStateManager, BLOCK_HISTORY_LENGTH};
pub use zkvm::ZkvmProofProducer;

/// Caller-supplied options attached to a proof request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofRequestOptions {
    pub block_id: u64,
    pub prover_address: Address,
    pub graffiti: B256,
}

/// A generated proof together with the block it proves.
#[derive(Debug, Clone)]
pub struct ProofWithHeader {
    pub block_id: u64,
    pub header: Header,
    pub meta: BlockMetadata,
    pub proof: Bytes,
    pub opts: ProofRequestOptions,
    pub tier: u16,
}

/// A proof producer serving a single tier.
///
/// `request_proof` may suspend for seconds to minutes while a remote host
/// proves; implementations must observe `ctx` and return
/// [`ProducerError::Cancelled`] promptly once it fires.
#[async_trait]
pub trait ProofProducer: Send + Sync {
    /// Request a proof for the given block.
    async fn request_proof(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
        block_id: u64,
        meta: &BlockMetadata,
        header: &Header,
        request_at: Instant,
    ) -> Result<ProofWithHeader, ProducerError>;

    /// Best-effort out-of-band cancellation of an in-flight request. Safe to
    /// call when no request is running.
    async fn request_cancel(
        &self,
        ctx: CancellationToken,
        opts: &ProofRequestOptions,
    ) -> Result<(), ProducerError>;

    /// The tier this producer serves. Stable for the producer's lifetime.
    fn tier(&self) -> u16;
}
