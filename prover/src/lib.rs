//! Multi-tier proof aggregation engine.
//!
//! Given a block identifier, the engine obtains a validity proof by driving
//! several independent proof producers in parallel and combining their
//! sub-proofs into a single on-chain submittable artifact once a configured
//! quorum is reached. See [`proof_producer::CombinedProofProducer`] for the
//! aggregation core and [`proof_producer::new_proof_producer`] for tier
//! construction.

pub mod metrics;
pub mod proof_producer;

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from `RUST_LOG`, defaulting to `info`.
pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
