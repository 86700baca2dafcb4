//! Comma-joined composite fields.
//!
//! Signatures travel as `"R,S"` and EC public keys as `"X,Y"` when a user
//! pastes or copies them as one string. Internally both are kept as
//! explicit pairs; the joined string only exists at this boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Split on the first comma.
///
/// Without a comma the whole input is the first component and the second
/// is empty. Nothing is trimmed.
#[must_use]
pub fn split_pair(input: &str) -> (String, String) {
    match input.split_once(',') {
        Some((first, second)) => (first.to_string(), second.to_string()),
        None => (input.to_string(), String::new()),
    }
}

/// Join two components for display.
///
/// Both present gives `"a,b"`; a lone component is shown alone.
#[must_use]
pub fn join_pair(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (false, false) => format!("{first},{second}"),
        (false, true) => first.to_string(),
        (true, false) => second.to_string(),
        (true, true) => String::new(),
    }
}

/// ECDSA signature as its two scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureComponents {
    /// R scalar
    pub r: String,
    /// S scalar
    pub s: String,
}

impl SignatureComponents {
    /// Build from both scalars.
    #[must_use]
    pub fn new(r: impl Into<String>, s: impl Into<String>) -> Self {
        Self {
            r: r.into(),
            s: s.into(),
        }
    }

    /// Parse an `"R,S"` string.
    #[must_use]
    pub fn parse(joined: &str) -> Self {
        let (r, s) = split_pair(joined);
        Self { r, s }
    }

    /// True when neither scalar is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.r.is_empty() && self.s.is_empty()
    }
}

impl fmt::Display for SignatureComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_pair(&self.r, &self.s))
    }
}

/// Elliptic-curve public key as affine coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcPoint {
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
}

impl EcPoint {
    /// Build from both coordinates.
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Parse an `"X,Y"` string.
    #[must_use]
    pub fn parse(joined: &str) -> Self {
        let (x, y) = split_pair(joined);
        Self { x, y }
    }

    /// True when neither coordinate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }
}

impl fmt::Display for EcPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_pair(&self.x, &self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_comma() {
        assert_eq!(split_pair("abc,def"), ("abc".to_string(), "def".to_string()));
    }

    #[test]
    fn test_split_without_comma() {
        assert_eq!(split_pair("abc"), ("abc".to_string(), String::new()));
        assert_eq!(split_pair(""), (String::new(), String::new()));
    }

    #[test]
    fn test_split_only_first_comma() {
        assert_eq!(split_pair("a,b,c"), ("a".to_string(), "b,c".to_string()));
        assert_eq!(split_pair(",b"), (String::new(), "b".to_string()));
        assert_eq!(split_pair("a,"), ("a".to_string(), String::new()));
    }

    #[test]
    fn test_join_for_display() {
        assert_eq!(join_pair("x", "y"), "x,y");
        assert_eq!(join_pair("x", ""), "x");
        assert_eq!(join_pair("", "y"), "y");
        assert_eq!(join_pair("", ""), "");
    }

    #[test]
    fn test_structured_types() {
        let sig = SignatureComponents::parse("1f,2e");
        assert_eq!(sig, SignatureComponents::new("1f", "2e"));
        assert_eq!(sig.to_string(), "1f,2e");

        let point = EcPoint::parse("04ab");
        assert_eq!(point.x, "04ab");
        assert!(point.y.is_empty());
        assert!(!point.is_empty());
        assert!(EcPoint::default().is_empty());
    }
}
