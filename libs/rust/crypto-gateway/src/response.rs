//! Response envelopes and key-pair shapes.
//!
//! Every endpoint answers with a JSON object carrying an optional `status`
//! and `message` next to its payload fields. Each operation reads exactly
//! one canonical payload field; a success envelope without it is treated
//! as a malformed response.

use crate::composite::{EcPoint, SignatureComponents};
use crate::error::{GatewayError, GatewayResult};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw backend envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// `0` on success; missing on endpoints that never fail softly
    #[serde(default)]
    pub status: Option<i64>,
    /// Failure cause, usually a string
    #[serde(default)]
    pub message: Option<Value>,
    /// Payload fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Envelope {
    /// Message as text. Non-string values keep their JSON text.
    #[must_use]
    pub fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Effective status, absent meaning success.
    #[must_use]
    pub fn status(&self) -> i64 {
        self.status.unwrap_or(0)
    }

    /// Whether the backend reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status() == 0
    }

    /// Turn a non-zero status into a backend error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] carrying the backend message.
    pub fn into_success(self) -> GatewayResult<Payload> {
        if self.is_success() {
            Ok(Payload {
                fields: self.fields,
            })
        } else {
            Err(GatewayError::backend(self.status(), self.message_text()))
        }
    }
}

/// Payload of a successful envelope.
#[derive(Debug, Clone)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Read a text field. Scalars other than strings keep their JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] when the field is absent
    /// or null.
    pub fn text(&self, field: &'static str) -> GatewayResult<String> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(GatewayError::MalformedResponse(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
        }
    }

    /// Read a boolean field. `"true"`/`"false"` strings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] when the field is absent
    /// or not boolean-like.
    pub fn flag(&self, field: &'static str) -> GatewayResult<bool> {
        match self.fields.get(field) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(GatewayError::MalformedResponse(field)),
        }
    }

    /// Deserialize the whole payload.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Serialization`] when the shape does not fit.
    pub fn parse<T: serde::de::DeserializeOwned>(self) -> GatewayResult<T> {
        serde_json::from_value(Value::Object(self.fields)).map_err(GatewayError::from)
    }

    /// ECDSA signature from its `r` and `s` fields.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] when either is absent.
    pub fn signature_components(&self) -> GatewayResult<SignatureComponents> {
        Ok(SignatureComponents::new(self.text("r")?, self.text("s")?))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RsaKeyPairWire {
    public_key: Option<String>,
    private_key: Option<String>,
    modulus: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EccKeyPairWire {
    public_key: Option<String>,
    private_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EcdsaKeyPairWire {
    public_key_x: Option<String>,
    public_key_y: Option<String>,
    private_key: Option<String>,
}

// A generated key component must be present and non-empty.
fn component(field: &'static str, value: Option<String>) -> GatewayResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(GatewayError::MalformedResponse(field))
}

/// RSA key pair (RSA-1024 and RSA-SHA1).
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    /// Public key
    pub public_key: String,
    /// Private key
    pub private_key: SecretString,
    /// Shared modulus
    pub modulus: String,
}

/// ECC-160 key pair.
#[derive(Debug, Clone)]
pub struct EccKeyPair {
    /// Public key
    pub public_key: String,
    /// Private key
    pub private_key: SecretString,
}

/// ECDSA key pair.
#[derive(Debug, Clone)]
pub struct EcdsaKeyPair {
    /// Public point
    pub public_key: EcPoint,
    /// Private scalar
    pub private_key: SecretString,
}

impl Payload {
    /// RSA key pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] naming the first missing
    /// or empty component.
    pub fn rsa_key_pair(self) -> GatewayResult<RsaKeyPair> {
        let wire: RsaKeyPairWire = self.parse()?;
        Ok(RsaKeyPair {
            public_key: component("publicKey", wire.public_key)?,
            private_key: SecretString::from(component("privateKey", wire.private_key)?),
            modulus: component("modulus", wire.modulus)?,
        })
    }

    /// ECC-160 key pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] naming the first missing
    /// or empty component.
    pub fn ecc_key_pair(self) -> GatewayResult<EccKeyPair> {
        let wire: EccKeyPairWire = self.parse()?;
        Ok(EccKeyPair {
            public_key: component("publicKey", wire.public_key)?,
            private_key: SecretString::from(component("privateKey", wire.private_key)?),
        })
    }

    /// ECDSA key pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] naming the first missing
    /// or empty component.
    pub fn ecdsa_key_pair(self) -> GatewayResult<EcdsaKeyPair> {
        let wire: EcdsaKeyPairWire = self.parse()?;
        let x = component("publicKeyX", wire.public_key_x)?;
        let y = component("publicKeyY", wire.public_key_y)?;
        Ok(EcdsaKeyPair {
            public_key: EcPoint::new(x, y),
            private_key: SecretString::from(component("privateKey", wire.private_key)?),
        })
    }
}
