//! Decrypted license claims and their validity window.
//!
//! Claims are JSON of the form:
//!
//! ```json
//! {"meta": {"issued": "2024-01-01T00:00:00.000Z", "expiry": "2025-01-01T00:00:00.000Z"},
//!  "data": {...},
//!  "included": [...]}
//! ```
//!
//! Only `meta.issued` and `meta.expiry` are interpreted. Everything else
//! is carried through untouched.

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// License metadata. Timestamps are kept exactly as issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseMeta {
    /// Issue time, ISO-8601.
    pub issued: String,
    /// Expiry time, ISO-8601.
    pub expiry: String,
    /// Any other metadata keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawClaims {
    meta: LicenseMeta,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    included: Value,
}

/// A license whose signature, encryption and validity window all checked out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseRecord {
    meta: LicenseMeta,
    data: Value,
    included: Value,
    #[serde(skip)]
    issued_at: DateTime<Utc>,
    #[serde(skip)]
    expires_at: DateTime<Utc>,
}

impl LicenseRecord {
    /// Returns the license metadata.
    #[must_use]
    pub fn meta(&self) -> &LicenseMeta {
        &self.meta
    }

    /// Returns the opaque `data` document (`null` if absent).
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the opaque `included` document (`null` if absent).
    #[must_use]
    pub fn included(&self) -> &Value {
        &self.included
    }

    /// Returns the parsed issue time.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns the parsed expiry time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Parses decrypted claims and checks them against `now`.
///
/// The window is inclusive: a license is accepted at exactly its issue or
/// expiry instant.
///
/// # Errors
///
/// Returns [`LicenseError::MalformedClaims`] if the plaintext is not a
/// claims document with parseable `meta.issued` and `meta.expiry`,
/// [`LicenseError::NotYetValid`] if it was issued after `now`, and
/// [`LicenseError::Expired`] if it expired before `now`.
pub fn validate(plaintext: &[u8], now: DateTime<Utc>) -> LicenseResult<LicenseRecord> {
    let raw: RawClaims = serde_json::from_slice(plaintext)
        .map_err(|e| LicenseError::MalformedClaims(format!("invalid claims JSON: {e}")))?;

    let issued_at = parse_timestamp(&raw.meta.issued, "meta.issued")?;
    let expires_at = parse_timestamp(&raw.meta.expiry, "meta.expiry")?;

    if issued_at > now {
        return Err(LicenseError::NotYetValid {
            issued: raw.meta.issued,
        });
    }
    if expires_at < now {
        return Err(LicenseError::Expired {
            expiry: raw.meta.expiry,
        });
    }

    Ok(LicenseRecord {
        meta: raw.meta,
        data: raw.data,
        included: raw.included,
        issued_at,
        expires_at,
    })
}

fn parse_timestamp(value: &str, field: &str) -> LicenseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| LicenseError::MalformedClaims(format!("invalid {field} timestamp: {e}")))
}
