//! Shared proptest generators.
//!
//! Strategies for the values users type into forms and the envelopes the
//! backend sends back.

use proptest::prelude::*;
use serde_json::{Value, json};

/// Printable ASCII text, possibly empty.
pub fn ascii_text_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,64}"
}

/// Printable ASCII text that is never empty.
pub fn non_empty_text_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,64}"
}

/// Arbitrary Unicode text, possibly empty.
pub fn unicode_text_strategy() -> impl Strategy<Value = String> {
    "\\PC{0,32}"
}

/// Lowercase hex string of 1..=64 bytes.
pub fn hex_key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 1..=64).prop_map(|bytes| {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    })
}

/// Composite component: text without commas.
pub fn component_strategy() -> impl Strategy<Value = String> {
    "[0-9a-fA-F ]{0,40}"
}

/// String that may or may not contain commas.
pub fn composite_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        component_strategy(),
        (component_strategy(), component_strategy()).prop_map(|(a, b)| format!("{a},{b}")),
        "[0-9a-f,]{0,40}",
    ]
}

/// Output encoding as it appears on the wire.
pub fn encoding_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("hex"), Just("base64")]
}

/// Non-zero backend status code.
pub fn failure_status_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..1000, -1000i64..0]
}

/// Human-readable backend message.
pub fn message_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 .:_-]{0,60}"
}

/// Failure envelope with a random status and message.
pub fn failure_envelope_strategy() -> impl Strategy<Value = (i64, String, Value)> {
    (failure_status_strategy(), message_strategy())
        .prop_map(|(status, message)| {
            let body = json!({ "status": status, "message": message });
            (status, message, body)
        })
}

/// PBKDF2 iteration count inside the accepted range.
pub fn iterations_strategy() -> impl Strategy<Value = u32> {
    1_000u32..=100_000
}

/// PBKDF2 iteration count outside the accepted range.
pub fn bad_iterations_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..1_000, 100_001u32..=u32::MAX]
}

/// PBKDF2 key length inside the accepted range.
pub fn key_length_strategy() -> impl Strategy<Value = u32> {
    16u32..=64
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_hex_keys_are_even_length_hex(key in hex_key_strategy()) {
            prop_assert_eq!(key.len() % 2, 0);
            prop_assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_components_have_no_comma(c in component_strategy()) {
            prop_assert!(!c.contains(','));
        }

        #[test]
        fn test_failure_status_non_zero(status in failure_status_strategy()) {
            prop_assert_ne!(status, 0);
        }

        #[test]
        fn test_failure_envelope_shape((status, message, body) in failure_envelope_strategy()) {
            prop_assert_eq!(body["status"].as_i64(), Some(status));
            prop_assert_eq!(body["message"].as_str(), Some(message.as_str()));
        }
    }
}
