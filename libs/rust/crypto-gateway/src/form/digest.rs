//! Hash-family forms: digests, HMAC and PBKDF2.

use super::FormStatus;
use crate::algorithm::{Digest, Mac, OutputEncoding};
use crate::encoding::{generate_hmac_key, generate_salt};
use crate::error::GatewayResult;
use crate::provider::CryptoGateway;
use crate::request::{
    DEFAULT_PBKDF2_ITERATIONS, DEFAULT_PBKDF2_KEY_LENGTH, DigestRequest, HmacRequest, Pbkdf2Request,
};
use secrecy::SecretString;

/// Digest form.
#[derive(Debug)]
pub struct DigestForm {
    /// Hash function
    pub digest: Digest,
    /// Input text
    pub input: String,
    /// Result encoding
    pub encoding: OutputEncoding,
    /// Last digest
    pub output: String,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl DigestForm {
    /// Empty form for `digest`.
    #[must_use]
    pub fn new(digest: Digest) -> Self {
        Self {
            digest,
            input: String::new(),
            encoding: OutputEncoding::default(),
            output: String::new(),
            status: FormStatus::default(),
        }
    }

    /// Hash the input.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn compute<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = DigestRequest {
            digest: self.digest,
            data: self.input.clone(),
            output_encoding: self.encoding,
        };
        let success = format!("{} hash computed", self.digest.algorithm());
        self.output = self.status.track(gateway.digest(&request), success).await?;
        Ok(())
    }

    /// Clear input, output and notice.
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.status.clear();
    }
}

/// HMAC form.
#[derive(Debug)]
pub struct HmacForm {
    /// MAC function
    pub mac: Mac,
    /// Secret key
    pub key: SecretString,
    /// Message
    pub message: String,
    /// Result encoding
    pub encoding: OutputEncoding,
    /// Last MAC
    pub output: String,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl HmacForm {
    /// Empty form for `mac`.
    #[must_use]
    pub fn new(mac: Mac) -> Self {
        Self {
            mac,
            key: SecretString::from(String::new()),
            message: String::new(),
            encoding: OutputEncoding::default(),
            output: String::new(),
            status: FormStatus::default(),
        }
    }

    /// Replace the key with 20 random bytes in hex.
    pub fn generate_key(&mut self) {
        self.key = SecretString::from(generate_hmac_key());
        self.status.succeed("Random key generated");
    }

    /// Compute the MAC of the message.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn compute<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = HmacRequest {
            mac: self.mac,
            key: self.key.clone(),
            message: self.message.clone(),
            output_encoding: self.encoding,
        };
        let success = format!("{} computed", self.mac.algorithm());
        self.output = self.status.track(gateway.hmac(&request), success).await?;
        Ok(())
    }

    /// Clear key, message, output and notice.
    pub fn clear(&mut self) {
        self.key = SecretString::from(String::new());
        self.message.clear();
        self.output.clear();
        self.status.clear();
    }
}

/// PBKDF2 form.
#[derive(Debug)]
pub struct Pbkdf2Form {
    /// Password
    pub password: SecretString,
    /// Salt
    pub salt: String,
    /// Iteration count
    pub iterations: u32,
    /// Derived key length in bytes
    pub key_length: u32,
    /// Result encoding
    pub encoding: OutputEncoding,
    /// Last derived key
    pub derived_key: String,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl Default for Pbkdf2Form {
    fn default() -> Self {
        Self {
            password: SecretString::from(String::new()),
            salt: String::new(),
            iterations: DEFAULT_PBKDF2_ITERATIONS,
            key_length: DEFAULT_PBKDF2_KEY_LENGTH,
            encoding: OutputEncoding::default(),
            derived_key: String::new(),
            status: FormStatus::default(),
        }
    }
}

impl Pbkdf2Form {
    /// Replace the salt with 16 random bytes in hex.
    pub fn generate_salt(&mut self) {
        self.salt = generate_salt();
        self.status.succeed("Random salt generated");
    }

    /// Derive a key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn derive<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = Pbkdf2Request {
            password: self.password.clone(),
            salt: self.salt.clone(),
            iterations: self.iterations,
            key_length: self.key_length,
            output_encoding: self.encoding,
        };
        self.derived_key = self
            .status
            .track(gateway.pbkdf2_derive(&request), "Key derived")
            .await?;
        Ok(())
    }

    /// Restore every field to its default.
    pub fn clear(&mut self) {
        self.password = SecretString::from(String::new());
        self.salt.clear();
        self.iterations = DEFAULT_PBKDF2_ITERATIONS;
        self.key_length = DEFAULT_PBKDF2_KEY_LENGTH;
        self.encoding = OutputEncoding::default();
        self.derived_key.clear();
        self.status.clear();
    }
}
