//! License file envelope parsing.
//!
//! A license file is a base64 body framed by delimiter lines:
//!
//! ```text
//! -----BEGIN LICENSE FILE-----
//! base64({"enc": "<ciphertext>.<iv>.<tag>", "sig": "<signature>", "alg": "aes-256-gcm+ed25519"})
//! -----END LICENSE FILE-----
//! ```
//!
//! Parsing only checks structure and the algorithm tag. Nothing in an
//! [`Envelope`] is trustworthy until it has been through
//! [`crate::verify`].

use crate::encoding::decode_base64;
use crate::error::{LicenseError, LicenseResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Opening delimiter line.
pub const BEGIN_MARKER: &str = "-----BEGIN LICENSE FILE-----";

/// Closing delimiter line.
pub const END_MARKER: &str = "-----END LICENSE FILE-----";

/// The encryption and signature scheme declared by a license file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES-256-GCM encryption, Ed25519 signature.
    Aes256GcmEd25519,
}

impl Algorithm {
    /// Returns the wire identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256GcmEd25519 => "aes-256-gcm+ed25519",
        }
    }
}

impl FromStr for Algorithm {
    type Err = LicenseError;

    fn from_str(s: &str) -> LicenseResult<Self> {
        match s {
            "aes-256-gcm+ed25519" => Ok(Self::Aes256GcmEd25519),
            other => Err(LicenseError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of a license file, as it appears on the wire.
#[derive(Deserialize)]
struct RawEnvelope {
    enc: String,
    sig: String,
    alg: String,
}

/// A structurally valid, not yet authenticated license file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    algorithm: Algorithm,
    encrypted_blob: String,
    signature: String,
}

impl Envelope {
    /// Returns the declared algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the `ciphertext.iv.tag` string exactly as it was signed.
    #[must_use]
    pub fn encrypted_blob(&self) -> &str {
        &self.encrypted_blob
    }

    /// Returns the base64 signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Parses license file text into an [`Envelope`].
///
/// # Errors
///
/// Returns [`LicenseError::MalformedArtifact`] if the body is not base64
/// encoded UTF-8 JSON with string `enc`, `sig` and `alg` fields, and
/// [`LicenseError::UnsupportedAlgorithm`] if `alg` is not recognized.
pub fn parse(artifact: &str) -> LicenseResult<Envelope> {
    let body = strip_markers(artifact);

    let decoded = decode_base64(&body)
        .map_err(|e| LicenseError::MalformedArtifact(format!("invalid base64: {e}")))?;

    let json = String::from_utf8(decoded)
        .map_err(|e| LicenseError::MalformedArtifact(format!("invalid UTF-8: {e}")))?;

    let raw: RawEnvelope = serde_json::from_str(&json)
        .map_err(|e| LicenseError::MalformedArtifact(format!("invalid JSON: {e}")))?;

    let algorithm = raw.alg.parse::<Algorithm>()?;

    Ok(Envelope {
        algorithm,
        encrypted_blob: raw.enc,
        signature: raw.sig,
    })
}

/// Removes every delimiter line, along with one trailing newline each.
fn strip_markers(artifact: &str) -> String {
    let mut body = artifact.to_string();
    for marker in [BEGIN_MARKER, END_MARKER] {
        body = body.replace(&format!("{marker}\n"), "").replace(marker, "");
    }
    body
}
