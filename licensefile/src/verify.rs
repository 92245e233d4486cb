//! Ed25519 signature verification of license file envelopes.
//!
//! The signature covers the ASCII bytes of `"license/"` followed by the
//! encrypted blob string exactly as it appears in the envelope. It is
//! checked over the ciphertext, so decryption never sees unauthenticated
//! input.

use crate::config::VerifierConfig;
use crate::encoding::decode_base64;
use crate::envelope::{Algorithm, Envelope};
use crate::error::{LicenseError, LicenseResult};
use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use std::ops::Deref;

/// Prefix of the signed message.
pub const SIGNING_PREFIX: &str = "license/";

/// A value whose signature has been checked.
///
/// Only this module can construct one, so any function taking a
/// `Verified<Envelope>` cannot be reached with unauthenticated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Unwraps the verified value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for Verified<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

/// Verifies envelopes against one trusted public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    verifying_key: VerifyingKey,
}

impl SignatureVerifier {
    /// Builds a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the configured key is not a
    /// DER-encoded Ed25519 public key.
    pub fn new(config: &VerifierConfig) -> LicenseResult<Self> {
        Self::from_der(&config.public_key).ok_or_else(|| {
            LicenseError::Config("public key is not a DER-encoded Ed25519 key".to_string())
        })
    }

    fn from_der(der: &[u8]) -> Option<Self> {
        let verifying_key = VerifyingKey::from_public_key_der(der).ok()?;
        Some(Self { verifying_key })
    }

    /// Checks the envelope's signature.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidSignature`] if the signature is not
    /// base64, has the wrong length, or does not verify.
    pub fn verify(&self, envelope: Envelope) -> LicenseResult<Verified<Envelope>> {
        match envelope.algorithm() {
            Algorithm::Aes256GcmEd25519 => {
                let sig_bytes =
                    decode_base64(envelope.signature()).map_err(|_| LicenseError::InvalidSignature)?;
                let signature =
                    Signature::from_slice(&sig_bytes).map_err(|_| LicenseError::InvalidSignature)?;

                let message = signed_message(envelope.encrypted_blob());
                self.verifying_key
                    .verify(&message, &signature)
                    .map_err(|_| LicenseError::InvalidSignature)?;
            }
        }

        Ok(Verified::new(envelope))
    }
}

/// Verifies an envelope against DER-encoded public key bytes.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidSignature`] if the key bytes are
/// malformed or the signature does not verify.
pub fn verify(public_key: &[u8], envelope: Envelope) -> LicenseResult<Verified<Envelope>> {
    SignatureVerifier::from_der(public_key)
        .ok_or(LicenseError::InvalidSignature)?
        .verify(envelope)
}

/// Returns the exact bytes the issuer signed.
#[must_use]
pub fn signed_message(encrypted_blob: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(SIGNING_PREFIX.len() + encrypted_blob.len());
    message.extend_from_slice(SIGNING_PREFIX.as_bytes());
    message.extend_from_slice(encrypted_blob.as_bytes());
    message
}
