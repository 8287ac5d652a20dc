//! ABI codec for the combined proof artifact.
//!
//! The on-chain verifier receives the sub-proofs of a combined tier as the
//! standard Solidity ABI v2 encoding of `(address verifier, bytes proof)[]`.
//! The encoding is deterministic and ordering-sensitive: sub-proofs appear in
//! the artifact in the order they were collected.

use alloy_sol_types::{sol, SolValue};
use thiserror::Error;

sol! {
    /// A single proof paired with the verifier contract that checks it.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct SubProof {
        address verifier;
        bytes proof;
    }
}

/// Errors raised by the sub-proof codec.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The byte string is not a valid `SubProof[]` encoding.
    #[error("invalid sub proof encoding: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

/// Encode sub-proofs into the artifact submitted on-chain.
///
/// Valid inputs never fail; the `Result` surface exists for parity with the
/// decoder and future framing checks.
pub fn encode_sub_proofs(sub_proofs: &[SubProof]) -> Result<Vec<u8>, EncodingError> {
    Ok(sub_proofs.abi_encode())
}

/// Decode an artifact back into its ordered sub-proof list.
pub fn decode_sub_proofs(data: &[u8]) -> Result<Vec<SubProof>, EncodingError> {
    Ok(Vec::<SubProof>::abi_decode(data)?)
}
