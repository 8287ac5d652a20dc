use std::path::Path;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Unified configuration for the multi-tier proof producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverConfig {
    pub raiko: RaikoConfig,
    pub risc0: Risc0Config,
    pub sp1: Sp1Config,
    pub guardian: GuardianConfig,
    pub verifiers: VerifierConfig,
}

/// Raiko host endpoint configuration, shared by the SGX and zkVM producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaikoConfig {
    pub host: Url,
    pub jwt_secret: String,
    /// Per-request timeout in seconds. Proving runs for minutes; the default
    /// is deliberately generous.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// RISC0 backend parameters forwarded to the zkVM host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risc0Config {
    pub bonsai: bool,
    pub snark: bool,
    pub profile: bool,
    pub execution_po2: u32,
}

/// SP1 backend parameters forwarded to the zkVM host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sp1Config {
    pub recursion: String,
    pub prover: String,
}

/// Guardian attestation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Identity the attestation is keyed by.
    pub identity: B256,
    /// Emit the liveness-bond sentinel payload instead of an attestation.
    #[serde(default)]
    pub return_liveness_bond: bool,
}

/// On-chain verifier contract addresses, one per proving tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    pub sgx: Address,
    pub risc0: Address,
    pub sp1: Address,
    pub guardian: Address,
}

fn default_request_timeout_secs() -> u64 {
    3600
}

impl ProverConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(ProverConfig {
            raiko: RaikoConfig::from_env()?,
            risc0: Risc0Config::from_env()?,
            sp1: Sp1Config::from_env()?,
            guardian: GuardianConfig::from_env()?,
            verifiers: VerifierConfig::from_env()?,
        })
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ProverConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.raiko.host.scheme() != "http" && self.raiko.host.scheme() != "https" {
            anyhow::bail!(
                "RAIKO_HOST must be an HTTP/HTTPS URL, got: {}",
                self.raiko.host
            );
        }
        if self.raiko.jwt_secret.is_empty() {
            anyhow::bail!("RAIKO_JWT_SECRET must not be empty");
        }
        if self.raiko.request_timeout_secs == 0 {
            anyhow::bail!("RAIKO_REQUEST_TIMEOUT must be at least 1 second");
        }
        if !(1..=32).contains(&self.risc0.execution_po2) {
            anyhow::bail!(
                "RISC0_EXECUTION_PO2 must be in 1..=32, got: {}",
                self.risc0.execution_po2
            );
        }
        if self.sp1.recursion.is_empty() {
            anyhow::bail!("SP1_RECURSION must not be empty");
        }
        if self.sp1.prover.is_empty() {
            anyhow::bail!("SP1_PROVER must not be empty");
        }
        Ok(())
    }
}

impl RaikoConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("RAIKO_HOST")
            .context("RAIKO_HOST environment variable is required for proof generation")?;
        let jwt_secret = std::env::var("RAIKO_JWT_SECRET")
            .context("RAIKO_JWT_SECRET environment variable is required for proof generation")?;

        Ok(RaikoConfig {
            host: Url::parse(&host)
                .with_context(|| format!("RAIKO_HOST must be a valid URL, got: {}", host))?,
            jwt_secret,
            request_timeout_secs: std::env::var("RAIKO_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or_else(default_request_timeout_secs),
        })
    }

    /// The per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Risc0Config {
    pub fn from_env() -> Result<Self> {
        Ok(Risc0Config {
            bonsai: bool_env("RISC0_BONSAI", false),
            snark: bool_env("RISC0_SNARK", true),
            profile: bool_env("RISC0_PROFILE", false),
            execution_po2: std::env::var("RISC0_EXECUTION_PO2")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(20),
        })
    }
}

impl Sp1Config {
    pub fn from_env() -> Result<Self> {
        Ok(Sp1Config {
            recursion: std::env::var("SP1_RECURSION").unwrap_or_else(|_| "plonk".to_string()),
            prover: std::env::var("SP1_PROVER").unwrap_or_else(|_| "network".to_string()),
        })
    }
}

impl GuardianConfig {
    pub fn from_env() -> Result<Self> {
        let identity = std::env::var("GUARDIAN_IDENTITY")
            .context("GUARDIAN_IDENTITY environment variable is required for proof generation")?;
        Ok(GuardianConfig {
            identity: identity.parse().with_context(|| {
                format!(
                    "GUARDIAN_IDENTITY must be a 32-byte hex value, got: {}",
                    identity
                )
            })?,
            return_liveness_bond: bool_env("RETURN_LIVENESS_BOND", false),
        })
    }
}

impl VerifierConfig {
    pub fn from_env() -> Result<Self> {
        Ok(VerifierConfig {
            sgx: address_env("SGX_VERIFIER_ADDRESS")?,
            risc0: address_env("RISC0_VERIFIER_ADDRESS")?,
            sp1: address_env("SP1_VERIFIER_ADDRESS")?,
            guardian: address_env("GUARDIAN_VERIFIER_ADDRESS")?,
        })
    }
}

fn bool_env(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(default)
}

fn address_env(name: &str) -> Result<Address> {
    let value = std::env::var(name)
        .with_context(|| format!("{name} environment variable is required for proof generation"))?;
    value
        .parse()
        .with_context(|| format!("{name} must be a 20-byte hex address, got: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn sample_config() -> ProverConfig {
        ProverConfig {
            raiko: RaikoConfig {
                host: Url::parse("http://localhost:8080").unwrap(),
                jwt_secret: "secret".to_string(),
                request_timeout_secs: 600,
            },
            risc0: Risc0Config {
                bonsai: false,
                snark: true,
                profile: false,
                execution_po2: 20,
            },
            sp1: Sp1Config {
                recursion: "plonk".to_string(),
                prover: "network".to_string(),
            },
            guardian: GuardianConfig {
                identity: B256::repeat_byte(0x42),
                return_liveness_bond: false,
            },
            verifiers: VerifierConfig {
                sgx: address!("1000000000000000000000000000000000000001"),
                risc0: address!("1000000000000000000000000000000000000002"),
                sp1: address!("1000000000000000000000000000000000000003"),
                guardian: address!("1000000000000000000000000000000000000004"),
            },
        }
    }

    #[test]
    fn sample_config_validates() {
        sample_config().validate().unwrap();
    }

    #[test]
    fn validate_rejects_non_http_host() {
        let mut config = sample_config();
        config.raiko.host = Url::parse("ftp://localhost:8080").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_jwt_secret() {
        let mut config = sample_config();
        config.raiko.jwt_secret.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_execution_po2() {
        let mut config = sample_config();
        config.risc0.execution_po2 = 0;
        assert!(config.validate().is_err());
        config.risc0.execution_po2 = 33;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = sample_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ProverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.raiko.host, config.raiko.host);
        assert_eq!(parsed.verifiers.sgx, config.verifiers.sgx);
        assert_eq!(parsed.guardian.identity, config.guardian.identity);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let json = r#"{
            "raiko": {"host": "http://localhost:8080", "jwt_secret": "secret"},
            "risc0": {"bonsai": false, "snark": true, "profile": false, "execution_po2": 20},
            "sp1": {"recursion": "plonk", "prover": "network"},
            "guardian": {"identity": "0x4242424242424242424242424242424242424242424242424242424242424242"},
            "verifiers": {
                "sgx": "0x1000000000000000000000000000000000000001",
                "risc0": "0x1000000000000000000000000000000000000002",
                "sp1": "0x1000000000000000000000000000000000000003",
                "guardian": "0x1000000000000000000000000000000000000004"
            }
        }"#;
        let config: ProverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.raiko.request_timeout_secs, 3600);
        assert!(!config.guardian.return_liveness_bond);
    }
}
