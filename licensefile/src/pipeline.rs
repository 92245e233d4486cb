//! The full verification pipeline.

use crate::cipher;
use crate::claims::{self, LicenseRecord};
use crate::clock::Clock;
use crate::config::VerifierConfig;
use crate::envelope;
use crate::error::LicenseResult;
use crate::verify::SignatureVerifier;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Verifies, decrypts and validates license files against one public key.
///
/// Stages run strictly in order and stop at the first failure:
/// parse, verify signature, decrypt, validate claims.
#[derive(Debug, Clone)]
pub struct LicenseFileVerifier {
    signatures: SignatureVerifier,
}

impl LicenseFileVerifier {
    /// Creates a verifier for the configured public key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::Config`] if the key cannot be decoded.
    pub fn new(config: &VerifierConfig) -> LicenseResult<Self> {
        Ok(Self {
            signatures: SignatureVerifier::new(config)?,
        })
    }

    /// Runs the pipeline using `clock` for the validity check.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails.
    pub fn verify(
        &self,
        artifact: &str,
        license_key: &str,
        clock: &impl Clock,
    ) -> LicenseResult<LicenseRecord> {
        self.verify_at(artifact, license_key, clock.now())
    }

    /// Runs the pipeline, checking the validity window against `now`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails.
    pub fn verify_at(
        &self,
        artifact: &str,
        license_key: &str,
        now: DateTime<Utc>,
    ) -> LicenseResult<LicenseRecord> {
        let envelope = envelope::parse(artifact)?;
        debug!(algorithm = %envelope.algorithm(), "license file format is valid");

        let verified = self.signatures.verify(envelope)?;
        debug!("license file signature is valid");

        let plaintext = cipher::decrypt(&verified, license_key)?;
        debug!(bytes = plaintext.len(), "license file decrypted");

        let record = claims::validate(&plaintext, now)?;
        debug!(
            issued = %record.issued_at(),
            expiry = %record.expires_at(),
            "license file is within its validity window"
        );

        Ok(record)
    }
}
