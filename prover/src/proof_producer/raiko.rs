//! HTTP client for the remote Raiko proving host, shared by the SGX and
//! zkVM producers.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, Bytes, B256};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use multiprover_config::RaikoConfig;

use super::error::ProducerError;

const PROOF_PATH: &str = "v2/proof";
const CANCEL_PATH: &str = "v2/proof/cancel";

/// Status the host reports once a proof is available.
const STATUS_OK: &str = "ok";

/// Lifetime of the per-request auth token.
const AUTH_TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Serialize)]
struct Claims {
    exp: u64,
}

/// Request body for `POST /v2/proof` and `POST /v2/proof/cancel`.
#[derive(Debug, Clone, Serialize)]
pub struct ProofRequestBody {
    pub block_number: u64,
    pub prover: Address,
    pub graffiti: B256,
    pub proof_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sgx: Option<SgxRequestParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risc0: Option<Risc0RequestParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp1: Option<Sp1RequestParams>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SgxRequestParams {
    pub setup: bool,
    pub bootstrap: bool,
    pub prove: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Risc0RequestParams {
    pub bonsai: bool,
    pub snark: bool,
    pub profile: bool,
    pub execution_po2: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sp1RequestParams {
    pub recursion: String,
    pub prover: String,
}

#[derive(Debug, Deserialize)]
struct ProofResponseBody {
    #[serde(default)]
    data: Option<ProofResponseData>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProofResponseData {
    #[serde(default)]
    proof: Option<ProofResponseProof>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProofResponseProof {
    proof: String,
}

/// JWT-authenticated client for a Raiko host.
#[derive(Debug, Clone)]
pub struct RaikoClient {
    host: Url,
    jwt_secret: String,
    request_timeout: Duration,
    client: Client,
}

impl RaikoClient {
    pub fn new(config: &RaikoConfig) -> Self {
        Self {
            host: config.host.clone(),
            jwt_secret: config.jwt_secret.clone(),
            request_timeout: config.request_timeout(),
            client: Client::new(),
        }
    }

    /// Request a proof from the host, racing the round-trip against `ctx`.
    /// Proving runs remotely for minutes; the host keeps working after a
    /// local cancellation unless [`Self::cancel_proof`] is also issued.
    pub async fn request_proof(
        &self,
        ctx: CancellationToken,
        body: &ProofRequestBody,
    ) -> Result<Bytes, ProducerError> {
        debug!(
            block_number = body.block_number,
            proof_type = body.proof_type,
            "sending proof request to raiko host"
        );

        let request = self
            .client
            .post(self.endpoint(PROOF_PATH)?)
            .bearer_auth(self.auth_token()?)
            .timeout(self.request_timeout)
            .json(body)
            .send();

        let response = tokio::select! {
            _ = ctx.cancelled() => return Err(ProducerError::Cancelled),
            response = request => response?,
        };
        let response = response.error_for_status()?;
        let body: ProofResponseBody = response.json().await?;

        let data = body.data.ok_or_else(|| {
            ProducerError::Host(body.message.unwrap_or_else(|| "empty response".to_string()))
        })?;
        if let Some(status) = &data.status {
            if status != STATUS_OK {
                return Err(ProducerError::Host(format!("proof not ready: {status}")));
            }
        }

        let proof = data
            .proof
            .ok_or_else(|| ProducerError::Host("response carries no proof".to_string()))?;
        proof
            .proof
            .parse::<Bytes>()
            .map_err(|err| ProducerError::Host(format!("invalid proof hex: {err}")))
    }

    /// Tell the host to drop an in-flight request. Best effort.
    pub async fn cancel_proof(
        &self,
        ctx: CancellationToken,
        body: &ProofRequestBody,
    ) -> Result<(), ProducerError> {
        debug!(
            block_number = body.block_number,
            proof_type = body.proof_type,
            "cancelling proof request on raiko host"
        );

        let request = self
            .client
            .post(self.endpoint(CANCEL_PATH)?)
            .bearer_auth(self.auth_token()?)
            .json(body)
            .send();

        let response = tokio::select! {
            _ = ctx.cancelled() => return Err(ProducerError::Cancelled),
            response = request => response?,
        };
        response.error_for_status()?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProducerError> {
        self.host
            .join(path)
            .map_err(|err| ProducerError::Host(format!("invalid host endpoint: {err}")))
    }

    fn auth_token(&self) -> Result<String, ProducerError> {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            + AUTH_TOKEN_TTL_SECS;
        Ok(encode(
            &JwtHeader::default(),
            &Claims { exp },
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }
}
