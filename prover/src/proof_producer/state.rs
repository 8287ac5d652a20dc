//! Per-block proof state, shared by the producer tasks of a combined tier.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use multiprover_bindings::{encode_sub_proofs, SubProof};

use super::error::ProducerError;

/// Number of blocks kept in the proof state history.
pub const BLOCK_HISTORY_LENGTH: u64 = 256;

#[derive(Debug, Default)]
struct BlockProofState {
    /// Tiers that produced a proof for this block, in completion order.
    /// Append-only for the lifetime of the state.
    verified_tiers: Vec<u16>,
    /// Collected sub-proofs, capped at the quorum size. Insertion order is
    /// the order sub-proofs appear in the encoded artifact.
    proofs: Vec<SubProof>,
}

/// Thread-safe map of block id to proof state.
///
/// Every operation takes one exclusive lock over the whole map, so the tier
/// append, the conditional proof append and the quorum check are atomic with
/// respect to each other. Contention is a non-issue: one update per producer
/// per block, with producers in the single digits.
#[derive(Debug, Default)]
pub struct ProofStateManager {
    states: Mutex<HashMap<u64, BlockProofState>>,
}

impl ProofStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a proof state exists for the block. Idempotent.
    pub fn create(&self, block_id: u64) {
        let mut states = self.states.lock().unwrap();
        states.entry(block_id).or_default();
    }

    /// Whether `tier` already produced a proof for the block during this
    /// session. False if the block is untracked.
    pub fn contains_tier(&self, block_id: u64, tier: u16) -> bool {
        let states = self.states.lock().unwrap();
        states
            .get(&block_id)
            .is_some_and(|state| state.verified_tiers.contains(&tier))
    }

    /// Record a successful proof for the block. The tier is always appended;
    /// the sub-proof only while the quorum is not yet filled. Returns true
    /// iff `proofs` holds exactly `required` entries afterwards.
    pub fn add_tier_and_proof(
        &self,
        block_id: u64,
        tier: u16,
        sub_proof: SubProof,
        required: u8,
    ) -> bool {
        let mut states = self.states.lock().unwrap();
        let state = states.entry(block_id).or_default();

        state.verified_tiers.push(tier);
        if state.proofs.len() < required as usize {
            state.proofs.push(sub_proof);
        }

        state.proofs.len() == required as usize
    }

    /// Number of sub-proofs collected for the block, 0 if untracked.
    pub fn proof_count(&self, block_id: u64) -> usize {
        let states = self.states.lock().unwrap();
        states.get(&block_id).map_or(0, |state| state.proofs.len())
    }

    /// Tiers recorded for the block, in completion order.
    pub fn verified_tiers(&self, block_id: u64) -> Vec<u16> {
        let states = self.states.lock().unwrap();
        states
            .get(&block_id)
            .map(|state| state.verified_tiers.clone())
            .unwrap_or_default()
    }

    /// Encode the collected sub-proofs into the on-chain artifact. The lock
    /// is held only to snapshot the list; encoding runs outside it.
    pub fn encode_proofs(&self, block_id: u64) -> Result<Vec<u8>, ProducerError> {
        let proofs = {
            let states = self.states.lock().unwrap();
            states
                .get(&block_id)
                .ok_or(ProducerError::StateMissing(block_id))?
                .proofs
                .clone()
        };
        Ok(encode_sub_proofs(&proofs)?)
    }

    /// Evict states for blocks that fell out of the history window. The
    /// threshold saturates at zero, so an early chain (`latest <
    /// history_length`) never evicts. The latest block itself is retained;
    /// it ages out of the window naturally.
    pub fn clean(&self, latest_block_id: u64, history_length: u64) {
        let mut states = self.states.lock().unwrap();
        if states.is_empty() {
            return;
        }

        let threshold = latest_block_id.saturating_sub(history_length);
        debug!(latest_block_id, threshold, "cleaning old proof states");
        states.retain(|&block_id, _| block_id >= threshold);
    }

    /// Number of blocks currently tracked.
    pub fn tracked_blocks(&self) -> usize {
        self.states.lock().unwrap().len()
    }
}
