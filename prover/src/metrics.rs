//! Prover metrics, exposed through the `metrics` facade. The hosting binary
//! decides whether and how to install a recorder.

use metrics::{gauge, Gauge};
use strum::Display;

pub trait MetricsGauge: std::fmt::Display {
    fn gauge(&self) -> Gauge {
        gauge!(self.to_string())
    }

    fn increment(&self, value: f64) {
        self.gauge().increment(value);
    }

    fn set(&self, value: f64) {
        self.gauge().set(value);
    }
}

#[derive(Debug, Clone, Copy, Display)]
pub enum ProverGauge {
    #[strum(serialize = "multiprover_proof_request_error_count")]
    ProofRequestErrorCount,
    #[strum(serialize = "multiprover_quorum_miss_count")]
    QuorumMissCount,
    #[strum(serialize = "multiprover_combined_proof_count")]
    CombinedProofCount,
    #[strum(serialize = "multiprover_cancelled_request_count")]
    CancelledRequestCount,
}

impl MetricsGauge for ProverGauge {}
