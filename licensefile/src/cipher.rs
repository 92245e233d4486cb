//! License file decryption using AES-256-GCM.
//!
//! The encrypted blob is `base64(ciphertext).base64(iv).base64(tag)` with
//! empty associated data.

use crate::encoding::decode_base64;
use crate::envelope::{Algorithm, Envelope};
use crate::error::{LicenseError, LicenseResult};
use crate::key::DerivedKey;
use crate::verify::Verified;
use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Nonce, Tag,
};

/// Size of the GCM initialization vector in bytes.
pub const IV_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Separator between the three segments of the encrypted blob.
pub const SEGMENT_SEPARATOR: char = '.';

/// The decoded segments of an encrypted blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedBlob {
    /// Ciphertext without the tag.
    pub ciphertext: Vec<u8>,
    /// Initialization vector.
    pub iv: Vec<u8>,
    /// Authentication tag.
    pub tag: Vec<u8>,
}

impl EncryptedBlob {
    /// Splits and decodes a `ciphertext.iv.tag` string.
    ///
    /// Segment lengths are not checked here; a wrong IV or tag length
    /// surfaces as [`LicenseError::DecryptionFailed`] from [`decrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MalformedCiphertext`] unless the string has
    /// exactly three base64 segments.
    pub fn parse(encoded: &str) -> LicenseResult<Self> {
        let parts: Vec<&str> = encoded.split(SEGMENT_SEPARATOR).collect();
        let [ciphertext, iv, tag] = parts.as_slice() else {
            return Err(LicenseError::MalformedCiphertext(format!(
                "expected 3 segments, found {}",
                parts.len()
            )));
        };

        Ok(Self {
            ciphertext: decode_segment(ciphertext, "ciphertext")?,
            iv: decode_segment(iv, "iv")?,
            tag: decode_segment(tag, "tag")?,
        })
    }
}

fn decode_segment(segment: &str, name: &str) -> LicenseResult<Vec<u8>> {
    decode_base64(segment)
        .map_err(|e| LicenseError::MalformedCiphertext(format!("invalid {name} base64: {e}")))
}

/// Decrypts a verified envelope with the license key it was issued for.
///
/// # Errors
///
/// Returns [`LicenseError::MalformedCiphertext`] if the blob is not three
/// base64 segments, and [`LicenseError::DecryptionFailed`] for any
/// authentication failure (wrong key, tampered data, bad IV or tag size).
pub fn decrypt(envelope: &Verified<Envelope>, license_key: &str) -> LicenseResult<Vec<u8>> {
    let blob = EncryptedBlob::parse(envelope.encrypted_blob())?;
    let key = DerivedKey::from_license_key(license_key);

    match envelope.algorithm() {
        Algorithm::Aes256GcmEd25519 => decrypt_aes_256_gcm(&key, blob),
    }
}

fn decrypt_aes_256_gcm(key: &DerivedKey, blob: EncryptedBlob) -> LicenseResult<Vec<u8>> {
    if blob.iv.len() != IV_SIZE || blob.tag.len() != TAG_SIZE {
        return Err(LicenseError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = Nonce::from_slice(&blob.iv);
    let tag = Tag::from_slice(&blob.tag);

    let mut buffer = blob.ciphertext;
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, tag)
        .map_err(|_| LicenseError::DecryptionFailed)?;

    Ok(buffer)
}
