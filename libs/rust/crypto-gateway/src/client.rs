//! HTTP client for the cryptographic backend.

use crate::{
    algorithm::{Algorithm, Operation},
    composite::SignatureComponents,
    config::GatewayConfig,
    encoding::decode_payload,
    error::{ErrorKind, GatewayError, GatewayResult},
    provider::CryptoGateway,
    request::{
        CodecRequest, DigestRequest, EccDecryptRequest, EccEncryptRequest, EcdsaSignRequest,
        EcdsaVerifyRequest, GatewayRequest, HmacRequest, Pbkdf2Request, RsaDecryptRequest,
        RsaEncryptRequest, RsaSha1SignRequest, RsaSha1VerifyRequest, SymmetricRequest,
    },
    response::{EccKeyPair, EcdsaKeyPair, Envelope, Payload, RsaKeyPair},
};
use async_trait::async_trait;
use gateway_common::build_http_client;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Backend client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base: String,
    http: Client,
}

impl GatewayClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration or when the HTTP
    /// client cannot be built.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;
        let http = build_http_client(&config.http_config()).map_err(GatewayError::Http)?;

        Ok(Self {
            base: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Create a client from environment configuration.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`] and [`GatewayClient::new`].
    pub fn from_env() -> GatewayResult<Self> {
        Self::new(&GatewayConfig::from_env()?)
    }

    /// Full URL of an endpoint.
    #[must_use]
    pub fn endpoint_url(&self, algorithm: Algorithm, operation: Operation) -> String {
        format!("{}/{}", self.base, algorithm.endpoint(operation))
    }

    #[instrument(
        skip(self, request),
        fields(algorithm = %request.algorithm(), operation = %operation)
    )]
    async fn call<R>(&self, operation: Operation, request: &R) -> GatewayResult<Payload>
    where
        R: GatewayRequest + Sync,
    {
        let algorithm = request.algorithm();
        algorithm.ensure_supports(operation)?;
        if let Err(e) = request.validate() {
            debug!(error = %e, "Request rejected before dispatch");
            return Err(e);
        }

        let result = self.exchange(algorithm, operation, Some(request.body())).await;
        log_outcome(&result);
        result
    }

    #[instrument(skip(self), fields(algorithm = %algorithm))]
    async fn generate(&self, algorithm: Algorithm) -> GatewayResult<Payload> {
        algorithm.ensure_supports(Operation::GenerateKeyPair)?;
        let result = self
            .exchange(algorithm, Operation::GenerateKeyPair, None)
            .await;
        log_outcome(&result);
        result
    }

    async fn exchange(
        &self,
        algorithm: Algorithm,
        operation: Operation,
        body: Option<Value>,
    ) -> GatewayResult<Payload> {
        let url = self.endpoint_url(algorithm, operation);
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .http
            .request(operation.method(), &url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(b) = body {
            request = request.json(&b);
        }

        debug!(%url, %request_id, "Dispatching request");

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(text) => serde_json::from_str::<Envelope>(&text)
                    .ok()
                    .and_then(|e| e.message_text())
                    .filter(|m| !m.is_empty())
                    .unwrap_or(text),
                Err(e) => {
                    warn!(error = %e, "Failed to read error body");
                    String::new()
                }
            };
            let message = if message.trim().is_empty() {
                status.canonical_reason().unwrap_or("no response body").to_string()
            } else {
                message
            };
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&text)?;
        envelope.into_success()
    }
}

fn log_outcome(result: &GatewayResult<Payload>) {
    match result {
        Ok(_) => debug!("Request succeeded"),
        Err(e) => match e.kind() {
            ErrorKind::Backend => warn!(error = %e, "Backend reported failure"),
            ErrorKind::Transport => error!(error = %e, "Request failed"),
            ErrorKind::Validation | ErrorKind::Local => debug!(error = %e, "Request not sent"),
        },
    }
}

#[async_trait]
impl CryptoGateway for GatewayClient {
    async fn symmetric_encrypt(&self, request: &SymmetricRequest) -> GatewayResult<String> {
        self.call(Operation::Encrypt, request).await?.text("result")
    }

    async fn symmetric_decrypt(&self, request: &SymmetricRequest) -> GatewayResult<String> {
        self.call(Operation::Decrypt, request).await?.text("result")
    }

    async fn rsa_encrypt(&self, request: &RsaEncryptRequest) -> GatewayResult<String> {
        self.call(Operation::Encrypt, request).await?.text("result")
    }

    async fn rsa_decrypt(&self, request: &RsaDecryptRequest) -> GatewayResult<String> {
        self.call(Operation::Decrypt, request).await?.text("result")
    }

    async fn rsa_key_pair(&self) -> GatewayResult<RsaKeyPair> {
        self.generate(Algorithm::Rsa1024).await?.rsa_key_pair()
    }

    async fn ecc_encrypt(&self, request: &EccEncryptRequest) -> GatewayResult<String> {
        self.call(Operation::Encrypt, request).await?.text("data")
    }

    async fn ecc_decrypt(&self, request: &EccDecryptRequest) -> GatewayResult<String> {
        let payload = self.call(Operation::Decrypt, request).await?.text("data")?;
        Ok(decode_payload(Algorithm::Ecc160, &payload))
    }

    async fn ecc_key_pair(&self) -> GatewayResult<EccKeyPair> {
        self.generate(Algorithm::Ecc160).await?.ecc_key_pair()
    }

    async fn ecdsa_sign(&self, request: &EcdsaSignRequest) -> GatewayResult<SignatureComponents> {
        self.call(Operation::Sign, request)
            .await?
            .signature_components()
    }

    async fn ecdsa_verify(&self, request: &EcdsaVerifyRequest) -> GatewayResult<bool> {
        self.call(Operation::Verify, request).await?.flag("valid")
    }

    async fn ecdsa_key_pair(&self) -> GatewayResult<EcdsaKeyPair> {
        self.generate(Algorithm::Ecdsa).await?.ecdsa_key_pair()
    }

    async fn rsa_sha1_sign(&self, request: &RsaSha1SignRequest) -> GatewayResult<String> {
        self.call(Operation::Sign, request).await?.text("signature")
    }

    async fn rsa_sha1_verify(&self, request: &RsaSha1VerifyRequest) -> GatewayResult<bool> {
        self.call(Operation::Verify, request).await?.flag("valid")
    }

    async fn rsa_sha1_key_pair(&self) -> GatewayResult<RsaKeyPair> {
        self.generate(Algorithm::RsaSha1).await?.rsa_key_pair()
    }

    async fn digest(&self, request: &DigestRequest) -> GatewayResult<String> {
        self.call(Operation::Digest, request).await?.text("result")
    }

    async fn hmac(&self, request: &HmacRequest) -> GatewayResult<String> {
        self.call(Operation::Digest, request).await?.text("result")
    }

    async fn pbkdf2_derive(&self, request: &Pbkdf2Request) -> GatewayResult<String> {
        self.call(Operation::Derive, request).await?.text("result")
    }

    async fn encode(&self, request: &CodecRequest) -> GatewayResult<String> {
        self.call(Operation::Encode, request).await?.text("result")
    }

    async fn decode(&self, request: &CodecRequest) -> GatewayResult<String> {
        self.call(Operation::Decode, request).await?.text("result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = GatewayClient::new(&GatewayConfig::new("http://localhost:8080/api/")).unwrap();
        assert_eq!(
            client.endpoint_url(Algorithm::Sm4, Operation::Encrypt),
            "http://localhost:8080/api/sm4/encrypt"
        );
        assert_eq!(
            client.endpoint_url(Algorithm::RsaSha1, Operation::GenerateKeyPair),
            "http://localhost:8080/api/rsasha1/keypair"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            GatewayClient::new(&GatewayConfig::new("localhost")),
            Err(GatewayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validation_happens_before_dispatch() {
        // Nothing listens on port 9; an attempted send would be a transport error.
        let client = GatewayClient::new(&GatewayConfig::new("http://127.0.0.1:9/api")).unwrap();
        let request = DigestRequest::new(crate::algorithm::Digest::Sha1, "");
        let err = tokio_test::block_on(client.digest(&request)).unwrap_err();
        assert!(matches!(err, GatewayError::MissingField("data")));
    }
}
