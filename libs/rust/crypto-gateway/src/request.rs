//! Request shapes sent to the backend.
//!
//! Each request knows its algorithm, which fields must be filled in, and
//! how to lay itself out as the JSON body the endpoint expects. Secret
//! material is held as [`SecretString`] and only exposed while building the
//! body.

use crate::algorithm::{Algorithm, CipherMode, Digest, Mac, OutputEncoding, SymmetricCipher, TextCodec};
use crate::composite::{EcPoint, SignatureComponents};
use crate::encoding::encode_payload;
use crate::error::{GatewayError, GatewayResult};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::ops::RangeInclusive;

/// Allowed PBKDF2 iteration counts.
pub const PBKDF2_ITERATIONS: RangeInclusive<u32> = 1_000..=100_000;

/// Allowed PBKDF2 key lengths in bytes.
pub const PBKDF2_KEY_LENGTH: RangeInclusive<u32> = 16..=64;

/// Default PBKDF2 iteration count.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 10_000;

/// Default PBKDF2 key length in bytes.
pub const DEFAULT_PBKDF2_KEY_LENGTH: u32 = 32;

/// A request the client can dispatch.
pub trait GatewayRequest {
    /// Catalog entry the request targets.
    fn algorithm(&self) -> Algorithm;

    /// Check required fields before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation-class [`GatewayError`] naming the first bad field.
    fn validate(&self) -> GatewayResult<()>;

    /// JSON body.
    fn body(&self) -> Value;
}

fn require(field: &'static str, value: &str) -> GatewayResult<()> {
    if value.is_empty() {
        Err(GatewayError::MissingField(field))
    } else {
        Ok(())
    }
}

fn require_secret(field: &'static str, value: &SecretString) -> GatewayResult<()> {
    require(field, value.expose_secret())
}

/// SM4/AES/RC6 encrypt or decrypt.
#[derive(Debug, Clone)]
pub struct SymmetricRequest {
    /// Cipher
    pub cipher: SymmetricCipher,
    /// Shared key
    pub key: SecretString,
    /// Plaintext or ciphertext
    pub data: String,
    /// Result encoding
    pub output_encoding: OutputEncoding,
    /// Block mode, only sent for AES
    pub mode: CipherMode,
}

impl SymmetricRequest {
    /// Request with default encoding and mode.
    #[must_use]
    pub fn new(cipher: SymmetricCipher, key: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            cipher,
            key: SecretString::from(key.into()),
            data: data.into(),
            output_encoding: OutputEncoding::default(),
            mode: CipherMode::default(),
        }
    }

    /// Set the result encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.output_encoding = encoding;
        self
    }

    /// Set the block mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: CipherMode) -> Self {
        self.mode = mode;
        self
    }
}

impl GatewayRequest for SymmetricRequest {
    fn algorithm(&self) -> Algorithm {
        self.cipher.algorithm()
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("key", &self.key)?;
        require("data", &self.data)
    }

    fn body(&self) -> Value {
        let mut body = json!({
            "key": self.key.expose_secret(),
            "data": self.data,
            "outputEncoding": self.output_encoding,
        });
        if self.cipher.takes_mode() {
            body["mode"] = json!(self.mode);
        }
        body
    }
}

/// RSA-1024 encryption under a public key.
#[derive(Debug, Clone)]
pub struct RsaEncryptRequest {
    /// Public exponent/key as issued by the backend
    pub public_key: String,
    /// Modulus as issued by the backend
    pub modulus: String,
    /// Plaintext
    pub data: String,
}

/// RSA-1024 decryption under a private key.
#[derive(Debug, Clone)]
pub struct RsaDecryptRequest {
    /// Private key as issued by the backend
    pub private_key: SecretString,
    /// Modulus as issued by the backend
    pub modulus: String,
    /// Base64 ciphertext
    pub data: String,
}

impl GatewayRequest for RsaEncryptRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rsa1024
    }

    fn validate(&self) -> GatewayResult<()> {
        require("publicKey", &self.public_key)?;
        require("modulus", &self.modulus)?;
        require("data", &self.data)
    }

    fn body(&self) -> Value {
        json!({
            "publicKey": self.public_key,
            "modulus": self.modulus,
            "data": self.data,
            "outputEncoding": OutputEncoding::Base64,
        })
    }
}

impl GatewayRequest for RsaDecryptRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rsa1024
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("privateKey", &self.private_key)?;
        require("modulus", &self.modulus)?;
        require("data", &self.data)
    }

    fn body(&self) -> Value {
        json!({
            "privateKey": self.private_key.expose_secret(),
            "modulus": self.modulus,
            "data": self.data,
            "outputEncoding": OutputEncoding::Base64,
        })
    }
}

/// ECC-160 encryption. The plaintext is base64-encoded on the wire.
#[derive(Debug, Clone)]
pub struct EccEncryptRequest {
    /// Public key as issued by the backend
    pub public_key: String,
    /// Plaintext as typed
    pub plaintext: String,
}

/// ECC-160 decryption.
#[derive(Debug, Clone)]
pub struct EccDecryptRequest {
    /// Private key as issued by the backend
    pub private_key: SecretString,
    /// Ciphertext as returned by encryption
    pub ciphertext: String,
}

impl GatewayRequest for EccEncryptRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ecc160
    }

    fn validate(&self) -> GatewayResult<()> {
        require("publicKey", &self.public_key)?;
        require("plaintext", &self.plaintext)
    }

    fn body(&self) -> Value {
        json!({
            "publicKey": self.public_key,
            "plaintext": encode_payload(Algorithm::Ecc160, &self.plaintext),
        })
    }
}

impl GatewayRequest for EccDecryptRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ecc160
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("privateKey", &self.private_key)?;
        require("ciphertext", &self.ciphertext)
    }

    fn body(&self) -> Value {
        json!({
            "privateKey": self.private_key.expose_secret(),
            "ciphertext": self.ciphertext,
        })
    }
}

/// ECDSA signing. The message is base64-encoded on the wire.
#[derive(Debug, Clone)]
pub struct EcdsaSignRequest {
    /// Message as typed
    pub message: String,
    /// Private key as issued by the backend
    pub private_key: SecretString,
}

/// ECDSA verification.
#[derive(Debug, Clone)]
pub struct EcdsaVerifyRequest {
    /// Message as typed
    pub message: String,
    /// Signer's public key
    pub public_key: EcPoint,
    /// Signature to check
    pub signature: SignatureComponents,
}

impl EcdsaVerifyRequest {
    /// Build from comma-joined `"X,Y"` key and `"R,S"` signature strings.
    #[must_use]
    pub fn from_joined(message: impl Into<String>, public_key: &str, signature: &str) -> Self {
        Self {
            message: message.into(),
            public_key: EcPoint::parse(public_key),
            signature: SignatureComponents::parse(signature),
        }
    }
}

impl GatewayRequest for EcdsaSignRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ecdsa
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("privateKey", &self.private_key)?;
        require("message", &self.message)
    }

    fn body(&self) -> Value {
        json!({
            "message": encode_payload(Algorithm::Ecdsa, &self.message),
            "privateKey": self.private_key.expose_secret(),
        })
    }
}

impl GatewayRequest for EcdsaVerifyRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ecdsa
    }

    // A one-part key or signature is still sent; its second half goes out empty.
    fn validate(&self) -> GatewayResult<()> {
        require("message", &self.message)?;
        require("publicKeyX", &self.public_key.x)?;
        require("signatureR", &self.signature.r)
    }

    fn body(&self) -> Value {
        json!({
            "message": encode_payload(Algorithm::Ecdsa, &self.message),
            "publicKeyX": self.public_key.x,
            "publicKeyY": self.public_key.y,
            "signatureR": self.signature.r,
            "signatureS": self.signature.s,
        })
    }
}

/// RSA-SHA1 signing.
#[derive(Debug, Clone)]
pub struct RsaSha1SignRequest {
    /// Message
    pub message: String,
    /// Private key as issued by the backend
    pub private_key: SecretString,
    /// Modulus as issued by the backend
    pub modulus: String,
}

/// RSA-SHA1 verification.
#[derive(Debug, Clone)]
pub struct RsaSha1VerifyRequest {
    /// Message
    pub message: String,
    /// Signature to check
    pub signature: String,
    /// Public key as issued by the backend
    pub public_key: String,
    /// Modulus as issued by the backend
    pub modulus: String,
}

impl GatewayRequest for RsaSha1SignRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RsaSha1
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("privateKey", &self.private_key)?;
        require("modulus", &self.modulus)?;
        require("message", &self.message)
    }

    fn body(&self) -> Value {
        json!({
            "message": self.message,
            "privateKey": self.private_key.expose_secret(),
            "modulus": self.modulus,
        })
    }
}

impl GatewayRequest for RsaSha1VerifyRequest {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RsaSha1
    }

    fn validate(&self) -> GatewayResult<()> {
        require("publicKey", &self.public_key)?;
        require("modulus", &self.modulus)?;
        require("message", &self.message)?;
        require("signature", &self.signature)
    }

    fn body(&self) -> Value {
        json!({
            "message": self.message,
            "signature": self.signature,
            "publicKey": self.public_key,
            "modulus": self.modulus,
        })
    }
}

/// Unkeyed hash.
#[derive(Debug, Clone)]
pub struct DigestRequest {
    /// Hash function
    pub digest: Digest,
    /// Input text
    pub data: String,
    /// Result encoding
    pub output_encoding: OutputEncoding,
}

impl DigestRequest {
    /// Hex-encoded digest of `data`.
    #[must_use]
    pub fn new(digest: Digest, data: impl Into<String>) -> Self {
        Self {
            digest,
            data: data.into(),
            output_encoding: OutputEncoding::default(),
        }
    }
}

impl GatewayRequest for DigestRequest {
    fn algorithm(&self) -> Algorithm {
        self.digest.algorithm()
    }

    fn validate(&self) -> GatewayResult<()> {
        require("data", &self.data)
    }

    fn body(&self) -> Value {
        json!({
            "data": self.data,
            "outputEncoding": self.output_encoding,
        })
    }
}

/// Keyed MAC.
#[derive(Debug, Clone)]
pub struct HmacRequest {
    /// MAC function
    pub mac: Mac,
    /// Secret key
    pub key: SecretString,
    /// Message
    pub message: String,
    /// Result encoding
    pub output_encoding: OutputEncoding,
}

impl HmacRequest {
    /// Hex-encoded MAC of `message` under `key`.
    #[must_use]
    pub fn new(mac: Mac, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            mac,
            key: SecretString::from(key.into()),
            message: message.into(),
            output_encoding: OutputEncoding::default(),
        }
    }
}

impl GatewayRequest for HmacRequest {
    fn algorithm(&self) -> Algorithm {
        self.mac.algorithm()
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("key", &self.key)?;
        require("message", &self.message)
    }

    fn body(&self) -> Value {
        json!({
            "key": self.key.expose_secret(),
            "message": self.message,
            "outputEncoding": self.output_encoding,
        })
    }
}

/// PBKDF2 key derivation.
#[derive(Debug, Clone)]
pub struct Pbkdf2Request {
    /// Password
    pub password: SecretString,
    /// Salt
    pub salt: String,
    /// Iteration count
    pub iterations: u32,
    /// Derived key length in bytes
    pub key_length: u32,
    /// Result encoding
    pub output_encoding: OutputEncoding,
}

impl Pbkdf2Request {
    /// Request with default iterations, key length and encoding.
    #[must_use]
    pub fn new(password: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            password: SecretString::from(password.into()),
            salt: salt.into(),
            iterations: DEFAULT_PBKDF2_ITERATIONS,
            key_length: DEFAULT_PBKDF2_KEY_LENGTH,
            output_encoding: OutputEncoding::default(),
        }
    }

    /// Set the iteration count.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the derived key length in bytes.
    #[must_use]
    pub const fn with_key_length(mut self, key_length: u32) -> Self {
        self.key_length = key_length;
        self
    }

    /// Set the result encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.output_encoding = encoding;
        self
    }
}

impl GatewayRequest for Pbkdf2Request {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Pbkdf2
    }

    fn validate(&self) -> GatewayResult<()> {
        require_secret("password", &self.password)?;
        require("salt", &self.salt)?;
        if !PBKDF2_ITERATIONS.contains(&self.iterations) {
            return Err(GatewayError::invalid(
                "iterations",
                format!(
                    "{} is outside {}..={}",
                    self.iterations,
                    PBKDF2_ITERATIONS.start(),
                    PBKDF2_ITERATIONS.end()
                ),
            ));
        }
        if !PBKDF2_KEY_LENGTH.contains(&self.key_length) {
            return Err(GatewayError::invalid(
                "keyLength",
                format!(
                    "{} is outside {}..={}",
                    self.key_length,
                    PBKDF2_KEY_LENGTH.start(),
                    PBKDF2_KEY_LENGTH.end()
                ),
            ));
        }
        Ok(())
    }

    fn body(&self) -> Value {
        json!({
            "password": self.password.expose_secret(),
            "salt": self.salt,
            "iterations": self.iterations,
            "keyLength": self.key_length,
            "outputEncoding": self.output_encoding,
        })
    }
}

/// Base64 or UTF-8 encode/decode.
#[derive(Debug, Clone)]
pub struct CodecRequest {
    /// Codec
    pub codec: TextCodec,
    /// Input
    pub data: String,
}

impl CodecRequest {
    /// Build a request.
    #[must_use]
    pub fn new(codec: TextCodec, data: impl Into<String>) -> Self {
        Self {
            codec,
            data: data.into(),
        }
    }
}

impl GatewayRequest for CodecRequest {
    fn algorithm(&self) -> Algorithm {
        self.codec.algorithm()
    }

    fn validate(&self) -> GatewayResult<()> {
        require("data", &self.data)
    }

    fn body(&self) -> Value {
        match self.codec {
            TextCodec::Base64 => json!({ "data": self.data }),
            TextCodec::Utf8 => json!({ "data": self.data, "encoding": "hex" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_body_mode_only_for_aes() {
        let sm4 = SymmetricRequest::new(SymmetricCipher::Sm4, "k", "d");
        assert_eq!(
            sm4.body(),
            json!({"key": "k", "data": "d", "outputEncoding": "hex"})
        );

        let aes = SymmetricRequest::new(SymmetricCipher::Aes, "k", "d").with_mode(CipherMode::Ecb);
        assert_eq!(aes.body()["mode"], "ECB");
    }

    #[test]
    fn test_symmetric_requires_key_and_data() {
        let req = SymmetricRequest::new(SymmetricCipher::Rc6, "", "d");
        assert!(matches!(req.validate(), Err(GatewayError::MissingField("key"))));
        let req = SymmetricRequest::new(SymmetricCipher::Rc6, "k", "");
        assert!(matches!(req.validate(), Err(GatewayError::MissingField("data"))));
    }

    #[test]
    fn test_ecdsa_verify_splits_joined_fields() {
        let req = EcdsaVerifyRequest::from_joined("hi", "aa,bb", "cc");
        assert!(req.validate().is_ok());
        assert_eq!(
            req.body(),
            json!({
                "message": "aGk=",
                "publicKeyX": "aa",
                "publicKeyY": "bb",
                "signatureR": "cc",
                "signatureS": "",
            })
        );
    }

    #[test]
    fn test_ecc_plaintext_is_base64() {
        let req = EccEncryptRequest {
            public_key: "pk".to_string(),
            plaintext: "hello".to_string(),
        };
        assert_eq!(req.body()["plaintext"], "aGVsbG8=");
    }

    #[test]
    fn test_rsa_output_encoding_fixed() {
        let req = RsaEncryptRequest {
            public_key: "e".to_string(),
            modulus: "n".to_string(),
            data: "hi".to_string(),
        };
        assert_eq!(req.body()["outputEncoding"], "base64");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_pbkdf2_ranges() {
        let req = Pbkdf2Request::new("hunter2", "abcd1234");
        assert!(req.validate().is_ok());
        assert_eq!(req.body()["keyLength"], 32);
        assert_eq!(req.body()["iterations"], 10_000);

        let err = req.clone().with_iterations(999).validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("Invalid iterations"));

        assert!(req.with_key_length(65).validate().is_err());
    }

    #[test]
    fn test_utf8_codec_sends_hex_encoding() {
        let req = CodecRequest::new(TextCodec::Utf8, "hi");
        assert_eq!(req.body(), json!({"data": "hi", "encoding": "hex"}));
        let req = CodecRequest::new(TextCodec::Base64, "hi");
        assert_eq!(req.body(), json!({"data": "hi"}));
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let req = HmacRequest::new(Mac::HmacSha256, "topsecretkey", "msg");
        let debug = format!("{req:?}");
        assert!(!debug.contains("topsecretkey"));
        assert!(debug.contains("msg"));
    }
}
