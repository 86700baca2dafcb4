//! Encrypt/decrypt forms: SM4/AES/RC6, RSA-1024 and ECC-160.

use super::FormStatus;
use crate::algorithm::{CipherMode, OutputEncoding, SymmetricCipher};
use crate::error::GatewayResult;
use crate::provider::CryptoGateway;
use crate::request::{
    EccDecryptRequest, EccEncryptRequest, RsaDecryptRequest, RsaEncryptRequest, SymmetricRequest,
};
use secrecy::SecretString;

const ENCRYPTED: &str = "Encryption succeeded";
const DECRYPTED: &str = "Decryption succeeded";
const KEYS_GENERATED: &str = "Key pair generated";

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

/// Shared-key cipher form.
#[derive(Debug)]
pub struct SymmetricForm {
    /// Cipher
    pub cipher: SymmetricCipher,
    /// Shared key
    pub key: SecretString,
    /// Plaintext side
    pub plaintext: String,
    /// Ciphertext side
    pub ciphertext: String,
    /// Result encoding
    pub encoding: OutputEncoding,
    /// AES block mode
    pub mode: CipherMode,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl SymmetricForm {
    /// Empty form for `cipher`.
    #[must_use]
    pub fn new(cipher: SymmetricCipher) -> Self {
        Self {
            cipher,
            key: empty_secret(),
            plaintext: String::new(),
            ciphertext: String::new(),
            encoding: OutputEncoding::default(),
            mode: CipherMode::default(),
            status: FormStatus::default(),
        }
    }

    fn request(&self, data: &str) -> SymmetricRequest {
        SymmetricRequest {
            cipher: self.cipher,
            key: self.key.clone(),
            data: data.to_string(),
            output_encoding: self.encoding,
            mode: self.mode,
        }
    }

    /// Encrypt the plaintext into the ciphertext field.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn encrypt<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = self.request(&self.plaintext);
        self.ciphertext = self
            .status
            .track(gateway.symmetric_encrypt(&request), ENCRYPTED)
            .await?;
        Ok(())
    }

    /// Decrypt the ciphertext into the plaintext field.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn decrypt<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = self.request(&self.ciphertext);
        self.plaintext = self
            .status
            .track(gateway.symmetric_decrypt(&request), DECRYPTED)
            .await?;
        Ok(())
    }

    /// Reset key, texts, encoding, mode and notice.
    pub fn clear(&mut self) {
        self.key = empty_secret();
        self.plaintext.clear();
        self.ciphertext.clear();
        self.encoding = OutputEncoding::default();
        self.mode = CipherMode::default();
        self.status.clear();
    }
}

/// RSA-1024 form.
#[derive(Debug)]
pub struct RsaForm {
    /// Public key
    pub public_key: String,
    /// Private key
    pub private_key: SecretString,
    /// Modulus
    pub modulus: String,
    /// Plaintext side
    pub plaintext: String,
    /// Base64 ciphertext side
    pub ciphertext: String,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl Default for RsaForm {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: empty_secret(),
            modulus: String::new(),
            plaintext: String::new(),
            ciphertext: String::new(),
            status: FormStatus::default(),
        }
    }
}

impl RsaForm {
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
            .track(gateway.rsa_key_pair(), KEYS_GENERATED)
            .await?;
        self.public_key = pair.public_key;
        self.private_key = pair.private_key;
        self.modulus = pair.modulus;
        Ok(())
    }

    /// Encrypt the plaintext under the public key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn encrypt<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = RsaEncryptRequest {
            public_key: self.public_key.clone(),
            modulus: self.modulus.clone(),
            data: self.plaintext.clone(),
        };
        self.ciphertext = self
            .status
            .track(gateway.rsa_encrypt(&request), ENCRYPTED)
            .await?;
        Ok(())
    }

    /// Decrypt the ciphertext under the private key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn decrypt<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = RsaDecryptRequest {
            private_key: self.private_key.clone(),
            modulus: self.modulus.clone(),
            data: self.ciphertext.clone(),
        };
        self.plaintext = self
            .status
            .track(gateway.rsa_decrypt(&request), DECRYPTED)
            .await?;
        Ok(())
    }

    /// Clear texts and notice, keeping the keys.
    pub fn clear(&mut self) {
        self.plaintext.clear();
        self.ciphertext.clear();
        self.status.clear();
    }
}

/// ECC-160 form.
#[derive(Debug)]
pub struct EccForm {
    /// Public key
    pub public_key: String,
    /// Private key
    pub private_key: SecretString,
    /// Plaintext side
    pub plaintext: String,
    /// Ciphertext side
    pub ciphertext: String,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl Default for EccForm {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: empty_secret(),
            plaintext: String::new(),
            ciphertext: String::new(),
            status: FormStatus::default(),
        }
    }
}

impl EccForm {
    /// Fill both key fields from a fresh key pair.
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
            .track(gateway.ecc_key_pair(), KEYS_GENERATED)
            .await?;
        self.public_key = pair.public_key;
        self.private_key = pair.private_key;
        Ok(())
    }

    /// Encrypt the plaintext under the public key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn encrypt<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = EccEncryptRequest {
            public_key: self.public_key.clone(),
            plaintext: self.plaintext.clone(),
        };
        self.ciphertext = self
            .status
            .track(gateway.ecc_encrypt(&request), ENCRYPTED)
            .await?;
        Ok(())
    }

    /// Decrypt the ciphertext under the private key.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn decrypt<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = EccDecryptRequest {
            private_key: self.private_key.clone(),
            ciphertext: self.ciphertext.clone(),
        };
        self.plaintext = self
            .status
            .track(gateway.ecc_decrypt(&request), DECRYPTED)
            .await?;
        Ok(())
    }

    /// Clear texts and notice, keeping the keys.
    pub fn clear(&mut self) {
        self.plaintext.clear();
        self.ciphertext.clear();
        self.status.clear();
    }
}
