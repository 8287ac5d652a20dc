//! Error taxonomy for proof production.

use multiprover_bindings::EncodingError;
use thiserror::Error;

/// Errors surfaced by proof producers and the aggregation core.
#[derive(Debug, Error)]
pub enum ProducerError {
    /// The request observed cancellation before a proof was produced.
    #[error("proof request cancelled")]
    Cancelled,

    /// A child producer of a combined tier failed.
    #[error("producer {index} error: {source}")]
    Producer {
        index: usize,
        #[source]
        source: Box<ProducerError>,
    },

    /// All producer tasks finished but fewer than `required` succeeded.
    /// Retrying the same block makes idempotent progress: already verified
    /// tiers are skipped.
    #[error("not enough proofs collected: required {required}, got {got}")]
    QuorumNotReached {
        required: u8,
        got: usize,
        causes: Vec<ProducerError>,
    },

    #[error("failed to encode sub proofs: {0}")]
    Encoding(#[from] EncodingError),

    /// Encoding was requested for a block the state store never saw. This is
    /// an internal invariant violation: the combined producer always creates
    /// the state before fanning out.
    #[error("no proof state tracked for block {0}")]
    StateMissing(u64),

    #[error("unsupported proof tier: {0}")]
    UnsupportedTier(u16),

    #[error("invalid producer configuration: {0}")]
    InvalidConfig(String),

    #[error("proof host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to sign proof host auth token: {0}")]
    Auth(#[from] jsonwebtoken::errors::Error),

    /// The host answered but did not hand back a usable proof.
    #[error("proof host rejected request: {0}")]
    Host(String),

    /// A spawned producer task aborted or panicked.
    #[error("producer task failed: {0}")]
    Task(String),
}

impl ProducerError {
    /// Whether this error is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProducerError::Cancelled)
    }
}
