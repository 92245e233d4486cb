//! Verifier configuration.

use crate::encoding::decode_base64;
use crate::error::{LicenseError, LicenseResult};

/// Trusted key material for license file verification.
///
/// Built once per process by the embedding application and handed to
/// [`crate::SignatureVerifier`] or [`crate::LicenseFileVerifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// SPKI/DER encoding of the issuer's Ed25519 public key.
    pub public_key: Vec<u8>,
}

impl VerifierConfig {
    /// Creates a configuration from DER-encoded public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if `public_key` is empty.
    pub fn new(public_key: impl Into<Vec<u8>>) -> LicenseResult<Self> {
        let public_key = public_key.into();
        if public_key.is_empty() {
            return Err(LicenseError::Config(
                "DER-encoded Ed25519 public key is required".to_string(),
            ));
        }
        Ok(Self { public_key })
    }

    /// Creates a configuration from a base64 string of the DER bytes, the
    /// form in which issuers usually publish their verify key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the string is blank or not base64.
    pub fn from_base64(encoded: &str) -> LicenseResult<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(LicenseError::Config(
                "DER-encoded Ed25519 public key is required".to_string(),
            ));
        }
        let der = decode_base64(encoded)
            .map_err(|e| LicenseError::Config(format!("invalid public key base64: {e}")))?;
        Self::new(der)
    }
}
