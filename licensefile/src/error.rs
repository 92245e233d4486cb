//! Error types for license file verification.

use std::fmt;
use thiserror::Error;

/// The pipeline stage an error was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Verifier configuration (public key provisioning).
    Config,
    /// Envelope parsing.
    Parse,
    /// Signature verification.
    Verify,
    /// Authenticated decryption.
    Decrypt,
    /// Claims validation.
    Validate,
}

impl Stage {
    /// Returns a short lowercase name for the stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Parse => "parse",
            Self::Verify => "verify",
            Self::Decrypt => "decrypt",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// License file verification errors.
///
/// Every variant is terminal for the artifact being processed.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Public key material is missing or cannot be decoded.
    #[error("configuration error: {0}")]
    Config(String),

    /// The artifact is not base64, not JSON, or lacks a required field.
    #[error("malformed license file: {0}")]
    MalformedArtifact(String),

    /// The artifact declares an algorithm we do not implement.
    #[error("license file algorithm is not supported: {0}")]
    UnsupportedAlgorithm(String),

    /// Ed25519 signature verification failed.
    #[error("license file signature verification failed")]
    InvalidSignature,

    /// The encrypted blob does not have the `ciphertext.iv.tag` shape.
    #[error("malformed license file ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Authenticated decryption failed. Carries no detail.
    #[error("license file decryption failed")]
    DecryptionFailed,

    /// Decrypted plaintext is not a valid claims document.
    #[error("malformed license file claims: {0}")]
    MalformedClaims(String),

    /// The license was issued after the evaluation time.
    #[error("license file is not valid until {issued}")]
    NotYetValid {
        /// The `meta.issued` value as it appears in the claims.
        issued: String,
    },

    /// The license expired before the evaluation time.
    #[error("license file has expired (expiry {expiry})")]
    Expired {
        /// The `meta.expiry` value as it appears in the claims.
        expiry: String,
    },
}

impl LicenseError {
    /// Returns the stage that produced this error.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config(_) => Stage::Config,
            Self::MalformedArtifact(_) | Self::UnsupportedAlgorithm(_) => Stage::Parse,
            Self::InvalidSignature => Stage::Verify,
            Self::MalformedCiphertext(_) | Self::DecryptionFailed => Stage::Decrypt,
            Self::MalformedClaims(_) | Self::NotYetValid { .. } | Self::Expired { .. } => {
                Stage::Validate
            }
        }
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
