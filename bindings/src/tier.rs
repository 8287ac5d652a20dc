//! Proof tier identifiers defined by the rollup protocol.
//!
//! The numeric values are protocol constants and must match the on-chain
//! tier registry. Higher values are stronger tiers.

/// Optimistic tier: asserts correctness without a cryptographic proof.
pub const TIER_OPTIMISTIC_ID: u16 = 100;

/// SGX attestation tier.
pub const TIER_SGX_ID: u16 = 200;

/// zkVM tier backed by the RISC0 prover.
pub const TIER_ZKVM_RISC0_ID: u16 = 250;

/// zkVM tier backed by the SP1 prover.
pub const TIER_ZKVM_SP1_ID: u16 = 251;

/// Combined tier requiring two of {SGX, RISC0, SP1}.
pub const TIER_TWO_OF_THREE_ID: u16 = 300;

/// Guardian minority tier.
pub const TIER_GUARDIAN_MINORITY_ID: u16 = 900;

/// Guardian majority tier, the tier of last resort.
pub const TIER_GUARDIAN_ID: u16 = 1000;

/// Human-readable tier name for logging.
pub fn tier_name(tier: u16) -> &'static str {
    match tier {
        TIER_OPTIMISTIC_ID => "optimistic",
        TIER_SGX_ID => "sgx",
        TIER_ZKVM_RISC0_ID => "zkvm_risc0",
        TIER_ZKVM_SP1_ID => "zkvm_sp1",
        TIER_TWO_OF_THREE_ID => "two_of_three",
        TIER_GUARDIAN_MINORITY_ID => "guardian_minority",
        TIER_GUARDIAN_ID => "guardian_majority",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_names_cover_known_tiers() {
        assert_eq!(tier_name(TIER_OPTIMISTIC_ID), "optimistic");
        assert_eq!(tier_name(TIER_SGX_ID), "sgx");
        assert_eq!(tier_name(TIER_ZKVM_RISC0_ID), "zkvm_risc0");
        assert_eq!(tier_name(TIER_ZKVM_SP1_ID), "zkvm_sp1");
        assert_eq!(tier_name(TIER_TWO_OF_THREE_ID), "two_of_three");
        assert_eq!(tier_name(TIER_GUARDIAN_MINORITY_ID), "guardian_minority");
        assert_eq!(tier_name(TIER_GUARDIAN_ID), "guardian_majority");
        assert_eq!(tier_name(7), "unknown");
    }

    #[test]
    fn tier_ordering_matches_strength() {
        assert!(TIER_OPTIMISTIC_ID < TIER_SGX_ID);
        assert!(TIER_SGX_ID < TIER_ZKVM_RISC0_ID);
        assert!(TIER_ZKVM_RISC0_ID < TIER_ZKVM_SP1_ID);
        assert!(TIER_ZKVM_SP1_ID < TIER_TWO_OF_THREE_ID);
        assert!(TIER_TWO_OF_THREE_ID < TIER_GUARDIAN_MINORITY_ID);
        assert!(TIER_GUARDIAN_MINORITY_ID < TIER_GUARDIAN_ID);
    }
}
