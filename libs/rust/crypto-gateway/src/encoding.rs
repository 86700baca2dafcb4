//! Payload encoding applied on the client side.

use crate::algorithm::{Algorithm, PayloadCodec};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::RngCore;
use std::fmt::Write as _;
use tracing::debug;
use zeroize::Zeroizing;

/// Bytes in a generated HMAC key.
pub const HMAC_KEY_BYTES: usize = 20;

/// Bytes in a generated PBKDF2 salt.
pub const SALT_BYTES: usize = 16;

/// Base64 of the UTF-8 bytes of `text`.
#[must_use]
pub fn encode_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 payload into text, falling back to the payload itself.
///
/// A payload that is not valid base64, or whose bytes are not UTF-8, is
/// returned unchanged so the caller still has something to show.
#[must_use]
pub fn decode_base64_lossy(payload: &str) -> String {
    let Ok(bytes) = STANDARD.decode(payload.trim()) else {
        debug!("payload is not base64, showing it raw");
        return payload.to_string();
    };
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            debug!("decoded payload is not UTF-8, showing it raw");
            payload.to_string()
        }
    }
}

/// Prepare free text for `algorithm`'s request payload.
#[must_use]
pub fn encode_payload(algorithm: Algorithm, text: &str) -> String {
    match algorithm.payload_codec() {
        PayloadCodec::Raw => text.to_string(),
        PayloadCodec::Base64 => encode_base64(text),
    }
}

/// Turn `algorithm`'s response payload back into text.
#[must_use]
pub fn decode_payload(algorithm: Algorithm, payload: &str) -> String {
    match algorithm.payload_codec() {
        PayloadCodec::Raw => payload.to_string(),
        PayloadCodec::Base64 => decode_base64_lossy(payload),
    }
}

/// `len` random bytes as lower-case hex.
#[must_use]
pub fn random_hex(len: usize) -> String {
    let mut bytes = Zeroizing::new(vec![0u8; len]);
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(len * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Fresh random HMAC key, 40 hex characters.
#[must_use]
pub fn generate_hmac_key() -> String {
    random_hex(HMAC_KEY_BYTES)
}

/// Fresh random PBKDF2 salt, 32 hex characters.
#[must_use]
pub fn generate_salt() -> String {
    random_hex(SALT_BYTES)
}
