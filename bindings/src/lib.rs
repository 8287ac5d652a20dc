//! Protocol-level bindings shared across the multiprover workspace.
//!
//! This crate holds the data the rollup protocol defines on-chain: the proof
//! tier table, the block metadata surfaced to proof producers, and the ABI
//! codec for the combined sub-proof artifact submitted to the verifier
//! contract.

pub mod encoding;
pub mod metadata;
pub mod tier;

pub use encoding::{decode_sub_proofs, encode_sub_proofs, EncodingError, SubProof};
pub use metadata::BlockMetadata;
