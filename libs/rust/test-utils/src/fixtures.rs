//! Canned backend response bodies.

use serde_json::{Value, json};

/// RSA public exponent used by the key-pair fixtures.
pub const RSA_PUBLIC_KEY: &str = "10001";

/// RSA private exponent used by the key-pair fixtures.
pub const RSA_PRIVATE_KEY: &str = "3f2a9c1b7e";

/// RSA modulus used by the key-pair fixtures.
pub const RSA_MODULUS: &str = "c0ffee1234abcd";

/// ECC public key used by the key-pair fixtures.
pub const ECC_PUBLIC_KEY: &str = "04a1b2c3d4";

/// ECC private key used by the key-pair fixtures.
pub const ECC_PRIVATE_KEY: &str = "5e6f7a8b";

/// ECDSA public X coordinate used by the key-pair fixtures.
pub const ECDSA_PUBLIC_X: &str = "9d1f";

/// ECDSA public Y coordinate used by the key-pair fixtures.
pub const ECDSA_PUBLIC_Y: &str = "7c2e";

/// ECDSA private scalar used by the key-pair fixtures.
pub const ECDSA_PRIVATE_KEY: &str = "a55a";

/// Success envelope carrying one payload field.
#[must_use]
pub fn success(field: &str, value: impl Into<Value>) -> Value {
    let mut body = json!({ "status": 0 });
    body[field] = value.into();
    body
}

/// Success envelope with `result`.
#[must_use]
pub fn result(value: &str) -> Value {
    success("result", value)
}

/// Failure envelope.
#[must_use]
pub fn failure(status: i64, message: &str) -> Value {
    json!({ "status": status, "message": message })
}

/// Failure envelope with no message.
#[must_use]
pub fn bare_failure(status: i64) -> Value {
    json!({ "status": status })
}

/// RSA key pair response.
#[must_use]
pub fn rsa_key_pair() -> Value {
    json!({
        "status": 0,
        "publicKey": RSA_PUBLIC_KEY,
        "privateKey": RSA_PRIVATE_KEY,
        "modulus": RSA_MODULUS,
    })
}

/// ECC key pair response.
#[must_use]
pub fn ecc_key_pair() -> Value {
    json!({
        "status": 0,
        "publicKey": ECC_PUBLIC_KEY,
        "privateKey": ECC_PRIVATE_KEY,
    })
}

/// ECDSA key pair response.
#[must_use]
pub fn ecdsa_key_pair() -> Value {
    json!({
        "status": 0,
        "publicKeyX": ECDSA_PUBLIC_X,
        "publicKeyY": ECDSA_PUBLIC_Y,
        "privateKey": ECDSA_PRIVATE_KEY,
    })
}

/// ECDSA signature response.
#[must_use]
pub fn ecdsa_signature(r: &str, s: &str) -> Value {
    json!({ "status": 0, "r": r, "s": s })
}

/// Verification verdict response.
#[must_use]
pub fn verdict(valid: bool) -> Value {
    success("valid", valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_sets_field() {
        let body = success("data", "abc");
        assert_eq!(body, json!({"status": 0, "data": "abc"}));
    }

    #[test]
    fn test_failure_shape() {
        assert_eq!(failure(3, "bad"), json!({"status": 3, "message": "bad"}));
        assert!(bare_failure(3).get("message").is_none());
    }

    #[test]
    fn test_key_pairs_have_all_fields() {
        assert_eq!(rsa_key_pair()["modulus"], RSA_MODULUS);
        assert_eq!(ecdsa_key_pair()["publicKeyY"], ECDSA_PUBLIC_Y);
        assert_eq!(ecc_key_pair()["privateKey"], ECC_PRIVATE_KEY);
    }
}
