//! The operation surface offered by the cryptographic backend.

use crate::composite::SignatureComponents;
use crate::error::GatewayResult;
use crate::request::{
    CodecRequest, DigestRequest, EccDecryptRequest, EccEncryptRequest, EcdsaSignRequest,
    EcdsaVerifyRequest, HmacRequest, Pbkdf2Request, RsaDecryptRequest, RsaEncryptRequest,
    RsaSha1SignRequest, RsaSha1VerifyRequest, SymmetricRequest,
};
use crate::response::{EccKeyPair, EcdsaKeyPair, RsaKeyPair};
use async_trait::async_trait;

/// One method per algorithm operation.
///
/// Every method validates its request before anything is sent and makes a
/// single attempt. Text results are ready for display: base64 payloads of
/// ECC-160 decryption are already decoded.
#[async_trait]
pub trait CryptoGateway: Send + Sync {
    /// Encrypt with SM4, AES or RC6.
    async fn symmetric_encrypt(&self, request: &SymmetricRequest) -> GatewayResult<String>;

    /// Decrypt with SM4, AES or RC6.
    async fn symmetric_decrypt(&self, request: &SymmetricRequest) -> GatewayResult<String>;

    /// RSA-1024 encryption, base64 ciphertext.
    async fn rsa_encrypt(&self, request: &RsaEncryptRequest) -> GatewayResult<String>;

    /// RSA-1024 decryption.
    async fn rsa_decrypt(&self, request: &RsaDecryptRequest) -> GatewayResult<String>;

    /// Fresh RSA-1024 key pair.
    async fn rsa_key_pair(&self) -> GatewayResult<RsaKeyPair>;

    /// ECC-160 encryption.
    async fn ecc_encrypt(&self, request: &EccEncryptRequest) -> GatewayResult<String>;

    /// ECC-160 decryption, decoded back to text when possible.
    async fn ecc_decrypt(&self, request: &EccDecryptRequest) -> GatewayResult<String>;

    /// Fresh ECC-160 key pair.
    async fn ecc_key_pair(&self) -> GatewayResult<EccKeyPair>;

    /// ECDSA signature.
    async fn ecdsa_sign(&self, request: &EcdsaSignRequest) -> GatewayResult<SignatureComponents>;

    /// ECDSA verification.
    async fn ecdsa_verify(&self, request: &EcdsaVerifyRequest) -> GatewayResult<bool>;

    /// Fresh ECDSA key pair.
    async fn ecdsa_key_pair(&self) -> GatewayResult<EcdsaKeyPair>;

    /// RSA-SHA1 signature.
    async fn rsa_sha1_sign(&self, request: &RsaSha1SignRequest) -> GatewayResult<String>;

    /// RSA-SHA1 verification.
    async fn rsa_sha1_verify(&self, request: &RsaSha1VerifyRequest) -> GatewayResult<bool>;

    /// Fresh RSA-SHA1 key pair.
    async fn rsa_sha1_key_pair(&self) -> GatewayResult<RsaKeyPair>;

    /// SHA1, SHA256, SHA3-512 or RIPEMD160 digest.
    async fn digest(&self, request: &DigestRequest) -> GatewayResult<String>;

    /// HMAC-SHA1 or HMAC-SHA256.
    async fn hmac(&self, request: &HmacRequest) -> GatewayResult<String>;

    /// PBKDF2 derived key.
    async fn pbkdf2_derive(&self, request: &Pbkdf2Request) -> GatewayResult<String>;

    /// Base64 or UTF-8 encode.
    async fn encode(&self, request: &CodecRequest) -> GatewayResult<String>;

    /// Base64 or UTF-8 decode.
    async fn decode(&self, request: &CodecRequest) -> GatewayResult<String>;
}
