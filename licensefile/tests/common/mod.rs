//! Shared test helpers: a miniature license issuer.

#![allow(dead_code)]

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use licensefile::{verify, Envelope, Verified};
use rand::RngCore;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

pub const ALG: &str = "aes-256-gcm+ed25519";

/// SPKI prefix for an Ed25519 public key (RFC 8410).
const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Returns a deterministic Ed25519 key pair from a fixed seed, with the
/// public half DER-encoded.
pub fn test_keypair() -> (SigningKey, Vec<u8>) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let der = spki_der(&signing_key.verifying_key());
    (signing_key, der)
}

/// A second key pair, for signatures from an untrusted issuer.
pub fn other_keypair() -> (SigningKey, Vec<u8>) {
    let signing_key = SigningKey::from_bytes(&[42u8; 32]);
    let der = spki_der(&signing_key.verifying_key());
    (signing_key, der)
}

pub fn spki_der(key: &VerifyingKey) -> Vec<u8> {
    let mut der = ED25519_SPKI_PREFIX.to_vec();
    der.extend_from_slice(key.as_bytes());
    der
}

/// Encrypts `plaintext` the way the issuer does: AES-256-GCM under
/// SHA-256(license key), random IV, empty AAD.
pub fn encrypt_blob(license_key: &str, plaintext: &[u8]) -> String {
    let mut iv = [0u8; 12];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    encrypt_blob_with_iv(license_key, plaintext, &iv)
}

pub fn encrypt_blob_with_iv(license_key: &str, plaintext: &[u8], iv: &[u8; 12]) -> String {
    let key = Sha256::digest(license_key.as_bytes());
    let cipher = Aes256Gcm::new_from_slice(&key).unwrap();
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(iv), b"", &mut buffer)
        .unwrap();
    join_blob(&buffer, iv, &tag)
}

pub fn join_blob(ciphertext: &[u8], iv: &[u8], tag: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        STANDARD.encode(ciphertext),
        STANDARD.encode(iv),
        STANDARD.encode(tag)
    )
}

/// Splits a blob into its decoded segments.
pub fn split_blob(enc: &str) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let parts: Vec<&str> = enc.split('.').collect();
    (
        STANDARD.decode(parts[0]).unwrap(),
        STANDARD.decode(parts[1]).unwrap(),
        STANDARD.decode(parts[2]).unwrap(),
    )
}

/// Signs `"license/" + enc` and returns the base64 signature.
pub fn sign_blob(signing_key: &SigningKey, enc: &str) -> String {
    let signature = signing_key.sign(format!("license/{enc}").as_bytes());
    STANDARD.encode(signature.to_bytes())
}

/// Frames an envelope JSON document as a license file.
pub fn frame_json(payload: &Value) -> String {
    frame_body(&STANDARD.encode(payload.to_string()))
}

pub fn frame_body(body: &str) -> String {
    format!("-----BEGIN LICENSE FILE-----\n{body}\n-----END LICENSE FILE-----\n")
}

pub fn frame(alg: &str, enc: &str, sig: &str) -> String {
    frame_json(&json!({ "enc": enc, "sig": sig, "alg": alg }))
}

/// Issues a complete license file for `claims`.
pub fn issue(signing_key: &SigningKey, license_key: &str, claims: &Value) -> String {
    let enc = encrypt_blob(license_key, claims.to_string().as_bytes());
    let sig = sign_blob(signing_key, &enc);
    frame(ALG, &enc, &sig)
}

/// Claims valid for calendar year 2024.
pub fn sample_claims() -> Value {
    json!({
        "meta": {
            "issued": "2024-01-01T00:00:00.000Z",
            "expiry": "2025-01-01T00:00:00.000Z",
            "ttl": 31_622_400
        },
        "data": {
            "id": "4c5a1b3e-5f0e-4a1e-9a0c-6f1b1d9b7c11",
            "type": "licenses",
            "attributes": { "name": "Pro", "maxMachines": 3 }
        },
        "included": [
            { "id": "entitlement-1", "type": "entitlements", "attributes": { "code": "PRO" } }
        ]
    })
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// A moment inside the [`sample_claims`] window.
pub fn mid_window() -> DateTime<Utc> {
    at("2024-06-15T12:00:00Z")
}

/// Parses and verifies an artifact issued by [`test_keypair`].
pub fn verified(artifact: &str) -> Verified<Envelope> {
    let (_, der) = test_keypair();
    let envelope = licensefile::envelope::parse(artifact).unwrap();
    verify::verify(&der, envelope).unwrap()
}
