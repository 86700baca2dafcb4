//! Form state driven through a mock backend.

use crypto_gateway::algorithm::{Digest, Mac, OutputEncoding, SymmetricCipher, TextCodec};
use crypto_gateway::form::{
    CodecForm, DigestForm, Direction, EccForm, EcdsaForm, HmacForm, NoticeLevel, Pbkdf2Form,
    RsaForm, RsaSha1Form, SymmetricForm,
};
use crypto_gateway::{GatewayClient, GatewayConfig, GatewayError};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use test_utils::fixtures;
use test_utils::mocks::MockBackend;

fn client_for(backend: &MockBackend) -> GatewayClient {
    GatewayClient::new(&GatewayConfig::new(backend.api_base())).unwrap()
}

#[tokio::test]
async fn test_symmetric_form_success_notice() {
    let backend = MockBackend::start().await;
    backend.on_post("sm4/encrypt", fixtures::result("cafe")).await;
    let client = client_for(&backend);

    let mut form = SymmetricForm::new(SymmetricCipher::Sm4);
    form.key = SecretString::from("0123456789abcdef".to_string());
    form.plaintext = "hello".to_string();
    form.encrypt(&client).await.unwrap();

    assert_eq!(form.ciphertext, "cafe");
    let notice = form.status.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.text, "Encryption succeeded");
    assert!(!form.status.is_busy());
}

#[tokio::test]
async fn test_backend_failure_leaves_output_untouched() {
    let backend = MockBackend::start().await;
    backend
        .on_post("aes/decrypt", fixtures::failure(1, "Decryption failed: bad padding"))
        .await;
    let client = client_for(&backend);

    let mut form = SymmetricForm::new(SymmetricCipher::Aes);
    form.key = SecretString::from("k".to_string());
    form.ciphertext = "00ff".to_string();
    form.plaintext = "previous".to_string();

    let err = form.decrypt(&client).await.unwrap_err();
    assert!(matches!(err, GatewayError::Backend { .. }));
    assert_eq!(form.plaintext, "previous");
    let notice = form.status.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Decryption failed: bad padding");
    assert!(!form.status.is_busy());
}

#[tokio::test]
async fn test_validation_failure_shows_notice_without_request() {
    let backend = MockBackend::start().await;
    backend.expect_no_requests().await;
    let client = client_for(&backend);

    let mut form = DigestForm::new(Digest::Sha1);
    let err = form.compute(&client).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        form.status.notice().unwrap().text,
        "Missing required field: data"
    );
}

#[tokio::test]
async fn test_rsa_form_keygen_then_encrypt() {
    let backend = MockBackend::start().await;
    backend
        .expect_get("rsa1024/keypair", fixtures::rsa_key_pair())
        .await;
    backend
        .expect_post(
            "rsa1024/encrypt",
            json!({
                "publicKey": fixtures::RSA_PUBLIC_KEY,
                "modulus": fixtures::RSA_MODULUS,
                "data": "attack at dawn",
                "outputEncoding": "base64",
            }),
            fixtures::result("ZW5j"),
        )
        .await;
    let client = client_for(&backend);

    let mut form = RsaForm::default();
    form.generate_keys(&client).await.unwrap();
    assert_eq!(form.status.notice().unwrap().text, "Key pair generated");

    form.plaintext = "attack at dawn".to_string();
    form.encrypt(&client).await.unwrap();
    assert_eq!(form.ciphertext, "ZW5j");

    form.clear();
    assert!(form.ciphertext.is_empty());
    assert!(form.status.notice().is_none());
    assert_eq!(form.modulus, fixtures::RSA_MODULUS);
}

#[tokio::test]
async fn test_ecc_form_round_trip_text() {
    let backend = MockBackend::start().await;
    backend.expect_get("ecc160/keypair", fixtures::ecc_key_pair()).await;
    backend
        .on_post("ecc160/decrypt", fixtures::success("data", "aGVsbG8="))
        .await;
    let client = client_for(&backend);

    let mut form = EccForm::default();
    form.generate_keys(&client).await.unwrap();
    assert_eq!(form.public_key, fixtures::ECC_PUBLIC_KEY);
    assert_eq!(form.private_key.expose_secret(), fixtures::ECC_PRIVATE_KEY);

    form.ciphertext = "opaque".to_string();
    form.decrypt(&client).await.unwrap();
    assert_eq!(form.plaintext, "hello");
}

#[tokio::test]
async fn test_ecdsa_keygen_fields_stay_editable() {
    let backend = MockBackend::start().await;
    backend
        .expect_get("ecdsa/keypair", fixtures::ecdsa_key_pair())
        .await;
    backend
        .expect_post(
            "ecdsa/verify",
            json!({
                "message": "aGk=",
                "publicKeyX": fixtures::ECDSA_PUBLIC_X,
                "publicKeyY": "edited",
                "signatureR": "r",
                "signatureS": "s",
            }),
            fixtures::verdict(false),
        )
        .await;
    let client = client_for(&backend);

    let mut form = EcdsaForm::default();
    form.generate_keys(&client).await.unwrap();
    assert_eq!(form.public_key.x, fixtures::ECDSA_PUBLIC_X);
    assert_eq!(form.public_key.y, fixtures::ECDSA_PUBLIC_Y);
    assert_eq!(form.private_key.expose_secret(), fixtures::ECDSA_PRIVATE_KEY);
    assert_eq!(
        form.public_key_text(),
        format!("{},{}", fixtures::ECDSA_PUBLIC_X, fixtures::ECDSA_PUBLIC_Y)
    );

    form.public_key.y = "edited".to_string();
    form.message = "hi".to_string();
    form.set_signature_text("r,s");

    let valid = form.verify(&client).await.unwrap();
    assert!(!valid);
    assert_eq!(form.verification, Some(false));
    assert_eq!(form.status.notice().unwrap().text, "Signature is not valid");
}

#[tokio::test]
async fn test_ecdsa_keygen_without_keys_shows_error() {
    let backend = MockBackend::start().await;
    backend.expect_get("ecdsa/keypair", json!({"status": 0})).await;
    let client = client_for(&backend);

    let mut form = EcdsaForm::default();
    form.public_key.x = "kept".to_string();
    let err = form.generate_keys(&client).await.unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse(_)));
    assert_eq!(form.public_key.x, "kept");
    let notice = form.status.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Response is missing field `publicKeyX`");
}

#[tokio::test]
async fn test_ecdsa_sign_fills_signature() {
    let backend = MockBackend::start().await;
    backend
        .expect_post(
            "ecdsa/sign",
            json!({"message": "aGk=", "privateKey": "a55a"}),
            fixtures::ecdsa_signature("1f", "2e"),
        )
        .await;
    let client = client_for(&backend);

    let mut form = EcdsaForm::default();
    form.private_key = SecretString::from("a55a".to_string());
    form.message = "hi".to_string();
    form.verification = Some(true);
    form.sign(&client).await.unwrap();

    assert_eq!(form.signature_text(), "1f,2e");
    assert_eq!(form.verification, None);
    assert_eq!(form.status.notice().unwrap().text, "Signature created");
}

#[tokio::test]
async fn test_rsa_sha1_verify_valid() {
    let backend = MockBackend::start().await;
    backend
        .expect_get("rsasha1/keypair", fixtures::rsa_key_pair())
        .await;
    backend.on_post("rsasha1/verify", fixtures::verdict(true)).await;
    let client = client_for(&backend);

    let mut form = RsaSha1Form::default();
    form.generate_keys(&client).await.unwrap();
    form.message = "m".to_string();
    form.signature = "5167".to_string();
    assert!(form.verify(&client).await.unwrap());
    assert_eq!(form.status.notice().unwrap().text, "Signature is valid");
}

#[tokio::test]
async fn test_hmac_form_generated_key_is_sent() {
    let backend = MockBackend::start().await;
    backend.on_post("hmacsha1/encrypt", fixtures::result("beef")).await;
    let client = client_for(&backend);

    let mut form = HmacForm::new(Mac::HmacSha1);
    form.generate_key();
    let key = form.key.expose_secret().to_string();
    assert_eq!(key.len(), 40);

    form.message = "msg".to_string();
    form.compute(&client).await.unwrap();
    assert_eq!(form.output, "beef");

    let bodies = backend.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["key"], key);
}

#[tokio::test]
async fn test_pbkdf2_form_defaults_and_clear() {
    let backend = MockBackend::start().await;
    backend
        .on_post("pbkdf2/encrypt", fixtures::result(&"0".repeat(64)))
        .await;
    let client = client_for(&backend);

    let mut form = Pbkdf2Form::default();
    assert_eq!(form.iterations, 10_000);
    assert_eq!(form.key_length, 32);

    form.password = SecretString::from("hunter2".to_string());
    form.generate_salt();
    assert_eq!(form.salt.len(), 32);
    form.iterations = 20_000;
    form.encoding = OutputEncoding::Base64;
    form.derive(&client).await.unwrap();
    assert_eq!(form.derived_key.len(), 64);
    assert_eq!(form.status.notice().unwrap().text, "Key derived");

    form.clear();
    assert_eq!(form.iterations, 10_000);
    assert_eq!(form.key_length, 32);
    assert_eq!(form.encoding, OutputEncoding::Hex);
    assert!(form.salt.is_empty());
    assert!(form.status.notice().is_none());
}

#[tokio::test]
async fn test_codec_form_round_trip() {
    let backend = MockBackend::start().await;
    backend.serve_base64().await;
    let client = client_for(&backend);

    let mut form = CodecForm::new(TextCodec::Base64);
    form.input = "round trip".to_string();
    form.submit(&client).await.unwrap();
    let encoded = form.output.clone();
    assert_eq!(encoded, "cm91bmQgdHJpcA==");

    form.set_direction(Direction::Decode);
    assert!(form.input.is_empty());
    form.input = encoded;
    form.submit(&client).await.unwrap();
    assert_eq!(form.output, "round trip");
    assert_eq!(form.status.notice().unwrap().text, "Base64 decoding succeeded");
}

#[tokio::test]
async fn test_codec_form_backend_rejects_bad_input() {
    let backend = MockBackend::start().await;
    backend.serve_base64().await;
    let client = client_for(&backend);

    let mut form = CodecForm::new(TextCodec::Base64);
    form.set_direction(Direction::Decode);
    form.input = "%%%".to_string();
    assert!(form.submit(&client).await.is_err());
    assert_eq!(form.status.notice().unwrap().text, "Invalid Base64 input");
    assert!(form.output.is_empty());
}

#[tokio::test]
async fn test_forms_do_not_share_state() {
    let backend = MockBackend::start().await;
    backend.on_post("sha1/encrypt", fixtures::failure(1, "boom")).await;
    let client = client_for(&backend);

    let mut failing = DigestForm::new(Digest::Sha1);
    let other = DigestForm::new(Digest::Sha256);
    failing.input = "x".to_string();
    assert!(failing.compute(&client).await.is_err());

    assert!(failing.status.notice().is_some());
    assert!(other.status.notice().is_none());
}
