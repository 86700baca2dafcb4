//! Signature forms: ECDSA and RSA-SHA1.

use super::FormStatus;
use crate::composite::{EcPoint, SignatureComponents};
use crate::error::GatewayResult;
use crate::provider::CryptoGateway;
use crate::request::{EcdsaSignRequest, EcdsaVerifyRequest, RsaSha1SignRequest, RsaSha1VerifyRequest};
use secrecy::SecretString;

const KEYS_GENERATED: &str = "Key pair generated";
const SIGNED: &str = "Signature created";
const VERIFIED: &str = "Verification complete";

/// Notice text for a verification verdict.
#[must_use]
pub const fn verdict_text(valid: bool) -> &'static str {
    if valid {
        "Signature is valid"
    } else {
        "Signature is not valid"
    }
}

/// ECDSA form.
///
/// Key and signature are held as explicit pairs; the comma-joined strings
/// are only produced and accepted through the `*_text` helpers.
#[derive(Debug)]
pub struct EcdsaForm {
    /// Public point
    pub public_key: EcPoint,
    /// Private scalar
    pub private_key: SecretString,
    /// Message as typed
    pub message: String,
    /// Signature from the last signing, or as entered
    pub signature: SignatureComponents,
    /// Verdict of the last verification
    pub verification: Option<bool>,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl Default for EcdsaForm {
    fn default() -> Self {
        Self {
            public_key: EcPoint::default(),
            private_key: SecretString::from(String::new()),
            message: String::new(),
            signature: SignatureComponents::default(),
            verification: None,
            status: FormStatus::default(),
        }
    }
}

impl EcdsaForm {
    /// Public key as one `"X,Y"` string.
    #[must_use]
    pub fn public_key_text(&self) -> String {
        self.public_key.to_string()
    }

    /// Replace the public key from an `"X,Y"` string.
    pub fn set_public_key_text(&mut self, joined: &str) {
        self.public_key = EcPoint::parse(joined);
    }

    /// Signature as one `"R,S"` string.
    #[must_use]
    pub fn signature_text(&self) -> String {
        self.signature.to_string()
    }

    /// Replace the signature from an `"R,S"` string.
    pub fn set_signature_text(&mut self, joined: &str) {
        self.signature = SignatureComponents::parse(joined);
    }

    /// Fill both coordinates and the private key from a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn generate_keys<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let pair = self
            .status
            .track(gateway.ecdsa_key_pair(), KEYS_GENERATED)
            .await?;
        self.public_key = pair.public_key;
        self.private_key = pair.private_key;
        Ok(())
    }

    /// Sign the message with the private key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn sign<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = EcdsaSignRequest {
            message: self.message.clone(),
            private_key: self.private_key.clone(),
        };
        self.signature = self.status.track(gateway.ecdsa_sign(&request), SIGNED).await?;
        self.verification = None;
        Ok(())
    }

    /// Verify the signature against the message and public key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn verify<G>(&mut self, gateway: &G) -> GatewayResult<bool>
    where
        G: CryptoGateway + ?Sized,
    {
        self.verification = None;
        let request = EcdsaVerifyRequest {
            message: self.message.clone(),
            public_key: self.public_key.clone(),
            signature: self.signature.clone(),
        };
        let valid = self
            .status
            .track(gateway.ecdsa_verify(&request), VERIFIED)
            .await?;
        self.verification = Some(valid);
        self.status.succeed(verdict_text(valid));
        Ok(valid)
    }

    /// Clear message, signature, verdict and notice, keeping the keys.
    pub fn clear(&mut self) {
        self.message.clear();
        self.signature = SignatureComponents::default();
        self.verification = None;
        self.status.clear();
    }
}

/// RSA-SHA1 form.
#[derive(Debug)]
pub struct RsaSha1Form {
    /// Public key
    pub public_key: String,
    /// Private key
    pub private_key: SecretString,
    /// Modulus
    pub modulus: String,
    /// Message
    pub message: String,
    /// Signature from the last signing, or as entered
    pub signature: String,
    /// Verdict of the last verification
    pub verification: Option<bool>,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl Default for RsaSha1Form {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: SecretString::from(String::new()),
            modulus: String::new(),
            message: String::new(),
            signature: String::new(),
            verification: None,
            status: FormStatus::default(),
        }
    }
}

impl RsaSha1Form {
    /// Fill all three key fields from a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn generate_keys<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let pair = self
            .status
            .track(gateway.rsa_sha1_key_pair(), KEYS_GENERATED)
            .await?;
        self.public_key = pair.public_key;
        self.private_key = pair.private_key;
        self.modulus = pair.modulus;
        Ok(())
    }

    /// Sign the message.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn sign<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = RsaSha1SignRequest {
            message: self.message.clone(),
            private_key: self.private_key.clone(),
            modulus: self.modulus.clone(),
        };
        self.signature = self
            .status
            .track(gateway.rsa_sha1_sign(&request), SIGNED)
            .await?;
        self.verification = None;
        Ok(())
    }

    /// Verify the signature.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn verify<G>(&mut self, gateway: &G) -> GatewayResult<bool>
    where
        G: CryptoGateway + ?Sized,
    {
        self.verification = None;
        let request = RsaSha1VerifyRequest {
            message: self.message.clone(),
            signature: self.signature.clone(),
            public_key: self.public_key.clone(),
            modulus: self.modulus.clone(),
        };
        let valid = self
            .status
            .track(gateway.rsa_sha1_verify(&request), VERIFIED)
            .await?;
        self.verification = Some(valid);
        self.status.succeed(verdict_text(valid));
        Ok(valid)
    }

    /// Clear message, signature, verdict and notice, keeping the keys.
    pub fn clear(&mut self) {
        self.message.clear();
        self.signature.clear();
        self.verification = None;
        self.status.clear();
    }
}
