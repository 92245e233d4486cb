//! Symmetric key derivation from a license key.
//!
//! The AES key is the SHA-256 digest of the license key string: no salt,
//! no work factor. Existing license files are encrypted this way, so the
//! derivation cannot change without breaking them. A low-entropy license
//! key is therefore open to offline brute force by anyone holding the
//! license file.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the derived AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// A derived decryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Derives the decryption key for a license key.
    #[must_use]
    pub fn from_license_key(license_key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(license_key.as_bytes());
        Self {
            bytes: hasher.finalize().into(),
        }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
