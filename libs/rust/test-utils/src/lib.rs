//! Shared test utilities for the crypto gateway crates.
//!
//! This crate provides:
//! - Proptest generators for form inputs and response envelopes
//! - A wiremock-backed stand-in for the cryptographic backend
//! - Canned response bodies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
