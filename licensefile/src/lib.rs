//! Verification and decryption of signed, encrypted license files.
//!
//! A license file carries AES-256-GCM encrypted claims and an Ed25519
//! signature over the ciphertext. Processing runs in four stages, each
//! gated on the previous one:
//!
//! 1. [`envelope::parse`] decodes the artifact and checks the algorithm tag
//! 2. [`verify::SignatureVerifier`] authenticates the encrypted blob and
//!    returns a [`Verified`] envelope
//! 3. [`cipher::decrypt`] derives the key from the license key and
//!    decrypts, accepting only a [`Verified`] envelope
//! 4. [`claims::validate`] checks the issue/expiry window
//!
//! [`LicenseFileVerifier`] composes all four.
//!
//! # Design Principles
//!
//! - **Verify before decrypt**: decryption is unreachable without a
//!   signature check, enforced by the [`Verified`] type
//! - **No I/O**: the caller reads files, provisions keys and prints results
//! - **Generic decryption errors**: AEAD failures never say why

pub mod cipher;
pub mod claims;
pub mod clock;
pub mod config;
mod encoding;
pub mod envelope;
mod error;
pub mod key;
mod pipeline;
pub mod verify;

pub use claims::{LicenseMeta, LicenseRecord};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::VerifierConfig;
pub use envelope::{Algorithm, Envelope};
pub use error::{LicenseError, LicenseResult, Stage};
pub use pipeline::LicenseFileVerifier;
pub use verify::{SignatureVerifier, Verified};
