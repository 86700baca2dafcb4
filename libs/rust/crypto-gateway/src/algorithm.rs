//! Algorithm catalog.
//!
//! The fixed list of algorithms the backend exposes, grouped the way the
//! selection sidebar groups them, plus the per-algorithm facts the client
//! needs: URL resource, offered operations and payload codec.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Shared-key block ciphers
    Symmetric,
    /// Public-key encryption and signatures
    Asymmetric,
    /// Digests, MACs and key derivation
    Hash,
    /// Text encodings
    Encode,
}

impl Family {
    /// All families in sidebar order.
    pub const ALL: [Self; 4] = [Self::Symmetric, Self::Asymmetric, Self::Hash, Self::Encode];

    /// Section title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Symmetric => "Symmetric Encryption",
            Self::Asymmetric => "Asymmetric Encryption",
            Self::Hash => "Hash Functions",
            Self::Encode => "Encoding",
        }
    }

    /// Algorithms in this family, in sidebar order.
    #[must_use]
    pub fn algorithms(self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|a| a.family() == self)
            .collect()
    }
}

/// A backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Encrypt
    Encrypt,
    /// Decrypt
    Decrypt,
    /// Sign
    Sign,
    /// Verify a signature
    Verify,
    /// Hash or MAC
    Digest,
    /// Key derivation
    Derive,
    /// Encode text
    Encode,
    /// Decode text
    Decode,
    /// Generate a key pair
    GenerateKeyPair,
}

impl Operation {
    /// Last path segment of the endpoint.
    ///
    /// One-way functions live under `encrypt` on the backend.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Encrypt | Self::Digest | Self::Derive => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::GenerateKeyPair => "keypair",
        }
    }

    /// HTTP method of the endpoint.
    #[must_use]
    pub fn method(self) -> reqwest::Method {
        match self {
            Self::GenerateKeyPair => reqwest::Method::GET,
            _ => reqwest::Method::POST,
        }
    }

    /// Name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Digest => "digest",
            Self::Derive => "derive",
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::GenerateKeyPair => "generate key pair",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How free text travels in a request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCodec {
    /// Sent as typed
    Raw,
    /// Base64 of the UTF-8 bytes on the way in, decoded on the way out
    Base64,
}

/// Every algorithm the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// SM4 block cipher
    Sm4,
    /// AES block cipher
    Aes,
    /// RC6 block cipher
    Rc6,
    /// 1024-bit RSA encryption
    Rsa1024,
    /// RSA signatures over SHA-1
    RsaSha1,
    /// 160-bit elliptic-curve encryption
    Ecc160,
    /// Elliptic-curve signatures
    Ecdsa,
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA3-512
    Sha3_512,
    /// RIPEMD-160
    Ripemd160,
    /// PBKDF2 key derivation
    Pbkdf2,
    /// HMAC over SHA-1
    HmacSha1,
    /// HMAC over SHA-256
    HmacSha256,
    /// Base64 text encoding
    Base64,
    /// UTF-8 to hex encoding
    Utf8,
}

impl Algorithm {
    /// All algorithms in sidebar order.
    pub const ALL: [Self; 16] = [
        Self::Sm4,
        Self::Aes,
        Self::Rc6,
        Self::Rsa1024,
        Self::RsaSha1,
        Self::Ecc160,
        Self::Ecdsa,
        Self::Sha1,
        Self::Sha256,
        Self::Sha3_512,
        Self::Ripemd160,
        Self::Pbkdf2,
        Self::HmacSha1,
        Self::HmacSha256,
        Self::Base64,
        Self::Utf8,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sm4 => "SM4",
            Self::Aes => "AES",
            Self::Rc6 => "RC6",
            Self::Rsa1024 => "RSA1024",
            Self::RsaSha1 => "RSASHA1",
            Self::Ecc160 => "ECC160",
            Self::Ecdsa => "ECDSA",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha3_512 => "SHA3-512",
            Self::Ripemd160 => "RIPEMD160",
            Self::Pbkdf2 => "PBKDF2",
            Self::HmacSha1 => "HMACSHA1",
            Self::HmacSha256 => "HMACSHA256",
            Self::Base64 => "Base64",
            Self::Utf8 => "UTF-8",
        }
    }

    /// URL resource segment under the API base.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Sm4 => "sm4",
            Self::Aes => "aes",
            Self::Rc6 => "rc6",
            Self::Rsa1024 => "rsa1024",
            Self::RsaSha1 => "rsasha1",
            Self::Ecc160 => "ecc160",
            Self::Ecdsa => "ecdsa",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha3_512 => "sha3-512",
            Self::Ripemd160 => "ripemd160",
            Self::Pbkdf2 => "pbkdf2",
            Self::HmacSha1 => "hmacsha1",
            Self::HmacSha256 => "hmacsha256",
            Self::Base64 => "base64",
            Self::Utf8 => "utf-8",
        }
    }

    /// Sidebar family.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Sm4 | Self::Aes | Self::Rc6 => Family::Symmetric,
            Self::Rsa1024 | Self::RsaSha1 | Self::Ecc160 | Self::Ecdsa => Family::Asymmetric,
            Self::Sha1
            | Self::Sha256
            | Self::Sha3_512
            | Self::Ripemd160
            | Self::Pbkdf2
            | Self::HmacSha1
            | Self::HmacSha256 => Family::Hash,
            Self::Base64 | Self::Utf8 => Family::Encode,
        }
    }

    /// Operations the backend offers for this algorithm.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        use Operation::{Decode, Decrypt, Derive, Digest, Encode, Encrypt, GenerateKeyPair, Sign, Verify};
        match self {
            Self::Sm4 | Self::Aes | Self::Rc6 => &[Encrypt, Decrypt],
            Self::Rsa1024 | Self::Ecc160 => &[Encrypt, Decrypt, GenerateKeyPair],
            Self::RsaSha1 | Self::Ecdsa => &[Sign, Verify, GenerateKeyPair],
            Self::Sha1
            | Self::Sha256
            | Self::Sha3_512
            | Self::Ripemd160
            | Self::HmacSha1
            | Self::HmacSha256 => &[Digest],
            Self::Pbkdf2 => &[Derive],
            Self::Base64 | Self::Utf8 => &[Encode, Decode],
        }
    }

    /// Whether the algorithm offers `operation`.
    #[must_use]
    pub fn supports(self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }

    /// Codec applied to free-text payloads.
    #[must_use]
    pub const fn payload_codec(self) -> PayloadCodec {
        match self {
            Self::Ecc160 | Self::Ecdsa => PayloadCodec::Base64,
            _ => PayloadCodec::Raw,
        }
    }

    /// Endpoint path relative to the API base, e.g. `sm4/encrypt`.
    #[must_use]
    pub fn endpoint(self, operation: Operation) -> String {
        format!("{}/{}", self.resource(), operation.verb())
    }

    /// Fail unless the algorithm offers `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unsupported`] for a pairing the backend lacks.
    pub fn ensure_supports(self, operation: Operation) -> Result<(), GatewayError> {
        if self.supports(operation) {
            Ok(())
        } else {
            Err(GatewayError::Unsupported {
                algorithm: self.name(),
                operation: operation.name(),
            })
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(wanted) || a.resource() == wanted)
            .ok_or_else(|| GatewayError::invalid("algorithm", format!("unknown algorithm {s}")))
    }
}

/// Textual representation of binary results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    /// Lower-case hex
    #[default]
    Hex,
    /// Standard base64
    Base64,
}

/// AES block mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CipherMode {
    /// Electronic codebook
    Ecb,
    /// Cipher block chaining
    #[default]
    Cbc,
    /// Cipher feedback
    Cfb,
    /// Output feedback
    Ofb,
}

/// Symmetric ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetricCipher {
    /// SM4
    Sm4,
    /// AES
    Aes,
    /// RC6
    Rc6,
}

impl SymmetricCipher {
    /// Catalog entry.
    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Sm4 => Algorithm::Sm4,
            Self::Aes => Algorithm::Aes,
            Self::Rc6 => Algorithm::Rc6,
        }
    }

    /// Whether requests carry a block mode.
    #[must_use]
    pub const fn takes_mode(self) -> bool {
        matches!(self, Self::Aes)
    }
}

/// Unkeyed digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digest {
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA3-512
    Sha3_512,
    /// RIPEMD-160
    Ripemd160,
}

impl Digest {
    /// Catalog entry.
    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Sha1 => Algorithm::Sha1,
            Self::Sha256 => Algorithm::Sha256,
            Self::Sha3_512 => Algorithm::Sha3_512,
            Self::Ripemd160 => Algorithm::Ripemd160,
        }
    }
}

/// Keyed MACs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mac {
    /// HMAC-SHA1
    HmacSha1,
    /// HMAC-SHA256
    HmacSha256,
}

impl Mac {
    /// Catalog entry.
    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::HmacSha1 => Algorithm::HmacSha1,
            Self::HmacSha256 => Algorithm::HmacSha256,
        }
    }
}

/// Text codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCodec {
    /// Base64
    Base64,
    /// UTF-8 bytes as hex
    Utf8,
}

impl TextCodec {
    /// Catalog entry.
    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Base64 => Algorithm::Base64,
            Self::Utf8 => Algorithm::Utf8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_algorithm_in_one_family() {
        let total: usize = Family::ALL.iter().map(|f| f.algorithms().len()).sum();
        assert_eq!(total, Algorithm::ALL.len());
        assert_eq!(
            Family::Symmetric.algorithms(),
            vec![Algorithm::Sm4, Algorithm::Aes, Algorithm::Rc6]
        );
        assert_eq!(Family::Encode.algorithms(), vec![Algorithm::Base64, Algorithm::Utf8]);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Algorithm::Sm4.endpoint(Operation::Encrypt), "sm4/encrypt");
        assert_eq!(Algorithm::Pbkdf2.endpoint(Operation::Derive), "pbkdf2/encrypt");
        assert_eq!(Algorithm::Sha256.endpoint(Operation::Digest), "sha256/encrypt");
        assert_eq!(Algorithm::Ecdsa.endpoint(Operation::GenerateKeyPair), "ecdsa/keypair");
        assert_eq!(Algorithm::Utf8.endpoint(Operation::Decode), "utf-8/decode");
        assert_eq!(Operation::GenerateKeyPair.method(), reqwest::Method::GET);
        assert_eq!(Operation::Verify.method(), reqwest::Method::POST);
    }

    #[test]
    fn test_parse_display_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().ok(), Some(algorithm));
        }
        assert_eq!("sha3-512".parse::<Algorithm>().ok(), Some(Algorithm::Sha3_512));
        assert!("DES".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_payload_codec() {
        assert_eq!(Algorithm::Ecc160.payload_codec(), PayloadCodec::Base64);
        assert_eq!(Algorithm::Ecdsa.payload_codec(), PayloadCodec::Base64);
        assert_eq!(Algorithm::Sm4.payload_codec(), PayloadCodec::Raw);
        assert_eq!(Algorithm::Sha1.payload_codec(), PayloadCodec::Raw);
    }

    #[test]
    fn test_ensure_supports() {
        assert!(Algorithm::Ecdsa.ensure_supports(Operation::Sign).is_ok());
        let err = Algorithm::Sha1.ensure_supports(Operation::Sign).unwrap_err();
        assert_eq!(err.to_string(), "SHA1 does not support sign");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&OutputEncoding::Hex).unwrap(), "\"hex\"");
        assert_eq!(serde_json::to_string(&CipherMode::Ofb).unwrap(), "\"OFB\"");
        assert_eq!(CipherMode::default(), CipherMode::Cbc);
        assert!(SymmetricCipher::Aes.takes_mode());
        assert!(!SymmetricCipher::Sm4.takes_mode());
    }
}
