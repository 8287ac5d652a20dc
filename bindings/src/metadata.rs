//! Block metadata handed to proof producers.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Metadata of the L2 block a proof is requested for, as emitted by the
/// protocol when the block was proposed. Producers forward the relevant
/// fields to their proving hosts; the aggregation core treats it as opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Fee recipient of the proposed block.
    pub beneficiary: Address,
    /// Gas limit of the proposed block.
    pub gas_limit: u32,
    /// Proposal timestamp.
    pub timestamp: u64,
    /// L1 block height the proposal anchored to.
    pub l1_height: u64,
    /// Hash of the anchoring L1 block.
    pub l1_hash: B256,
    /// Protocol-assigned difficulty seed.
    pub difficulty: B256,
    /// Whether the transaction list was posted as a blob.
    pub blob_used: bool,
}
