//! Client-side request/response contract for the cryptographic backend.
//!
//! Builds validated request bodies for each supported algorithm, sends them
//! to `{base}/{resource}/{verb}`, normalises the `{status, message, ...}`
//! envelope, and keeps per-form busy and notice state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algorithm;
pub mod client;
pub mod composite;
pub mod config;
pub mod encoding;
pub mod error;
pub mod form;
pub mod provider;
pub mod request;
pub mod response;

pub use algorithm::{Algorithm, CipherMode, Family, Operation, OutputEncoding};
pub use client::GatewayClient;
pub use composite::{EcPoint, SignatureComponents};
pub use config::GatewayConfig;
pub use error::{ErrorKind, GatewayError, GatewayResult};
pub use provider::CryptoGateway;
pub use request::GatewayRequest;
pub use response::{EccKeyPair, EcdsaKeyPair, Envelope, RsaKeyPair};

pub use gateway_common::{TracingConfig, init_tracing};
