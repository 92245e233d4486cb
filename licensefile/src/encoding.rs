//! Base64 decoding shared by every stage.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    DecodeError, Engine,
};

/// Standard alphabet, padding optional, trailing bits tolerated.
///
/// License files are produced by tooling with a forgiving base64 decoder,
/// so we accept the same inputs it does.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes base64, skipping ASCII whitespace (line wrapping, `\r`).
pub(crate) fn decode_base64(input: &str) -> Result<Vec<u8>, DecodeError> {
    if input.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        LENIENT.decode(compact)
    } else {
        LENIENT.decode(input)
    }
}
