//! Stand-in for the cryptographic backend.
//!
//! [`MockBackend`] wraps a wiremock server mounted under `/api`, the same
//! prefix the real backend uses. Mounted mocks carry call-count
//! expectations that wiremock checks when the backend is dropped.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use wiremock::matchers::{any, body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Path prefix of every endpoint.
pub const API_PREFIX: &str = "/api";

/// Mock backend server.
#[derive(Debug)]
pub struct MockBackend {
    server: MockServer,
}

impl MockBackend {
    /// Start a backend on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to the client.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}{API_PREFIX}", self.server.uri())
    }

    /// Underlying wiremock server.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Expect exactly one POST to `endpoint` with `request` as its body.
    pub async fn expect_post(&self, endpoint: &str, request: Value, response: Value) {
        Mock::given(method("POST"))
            .and(path(format!("{API_PREFIX}/{endpoint}")))
            .and(header_exists("X-Request-Id"))
            .and(body_json(request))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every POST to `endpoint` with `response`, whatever the body.
    pub async fn on_post(&self, endpoint: &str, response: Value) {
        self.on_post_with_status(endpoint, 200, response).await;
    }

    /// Answer every POST to `endpoint` with `response` and an HTTP status.
    pub async fn on_post_with_status(&self, endpoint: &str, status: u16, response: Value) {
        Mock::given(method("POST"))
            .and(path(format!("{API_PREFIX}/{endpoint}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(response))
            .mount(&self.server)
            .await;
    }

    /// Answer every POST to `endpoint` with a raw text body.
    pub async fn on_post_raw(&self, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(format!("{API_PREFIX}/{endpoint}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Expect exactly one GET to `endpoint`.
    pub async fn expect_get(&self, endpoint: &str, response: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{API_PREFIX}/{endpoint}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve real Base64 encode/decode on `base64/encode` and `base64/decode`.
    pub async fn serve_base64(&self) {
        Mock::given(method("POST"))
            .and(path(format!("{API_PREFIX}/base64/encode")))
            .respond_with(Base64Responder)
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{API_PREFIX}/base64/decode")))
            .respond_with(Base64Responder)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any request reaches the backend.
    pub async fn expect_no_requests(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far.
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// Responder that really encodes and decodes Base64.
#[derive(Debug, Clone, Copy)]
pub struct Base64Responder;

impl Respond for Base64Responder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400);
        };
        let data = body["data"].as_str().unwrap_or_default();

        let reply = if request.url.path().ends_with("/encode") {
            json!({ "status": 0, "result": STANDARD.encode(data) })
        } else {
            match STANDARD.decode(data).map(String::from_utf8) {
                Ok(Ok(text)) => json!({ "status": 0, "result": text }),
                _ => json!({ "status": 1, "message": "Invalid Base64 input" }),
            }
        };
        ResponseTemplate::new(200).set_body_json(reply)
    }
}
